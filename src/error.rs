//! Unified error type for playerpad.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for
//! on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Sensor
    /// The accelerometer did not answer its identity probe at open time.
    DeviceNotFound,

    /// A sensor transaction failed on an already opened port.
    Transport(TransportError),

    // Interrupts
    /// The platform refused to install the button interrupt handler.
    IrqRegistration(IrqRegistrationError),
}

/// Failures reported by a sensor transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The bus transaction did not complete.
    Bus,
    /// The device answered with an unexpected identity byte.
    WrongDevice(u8),
}

/// Reasons the interrupt registration table can refuse a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqRegistrationError {
    /// The line number is beyond the controller's table.
    LineOutOfRange(u16),
    /// Another handler already owns the line.
    AlreadyClaimed(u16),
}

// Convenience conversions

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl From<IrqRegistrationError> for Error {
    fn from(e: IrqRegistrationError) -> Self {
        Error::IrqRegistration(e)
    }
}
