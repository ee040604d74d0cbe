//! Accelerometer port.
//!
//! The transport (SPI core, bit-banged bus, host mock) is an external
//! collaborator behind [`AxisTransport`]. [`SensorPort`] owns it for the
//! lifetime of the program and only exists once the device has answered
//! its identity probe, so reading from an unopened sensor cannot be
//! expressed.

use crate::error::{Error, TransportError};

/// One signed X-axis reading. Valid only for the cycle that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSample(pub i32);

impl SensorSample {
    /// Raw axis value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

/// Register-level access to an accelerometer.
pub trait AxisTransport {
    /// Confirm the expected device is present.
    fn probe(&mut self) -> Result<(), TransportError>;

    /// Issue one blocking transaction returning the X-axis value.
    fn read_x(&mut self) -> Result<i32, TransportError>;
}

/// Exclusive handle on an opened accelerometer.
pub struct SensorPort<T> {
    handle: T,
}

impl<T: AxisTransport> SensorPort<T> {
    /// Probe the device behind `transport` and take ownership of it.
    ///
    /// Any probe failure is reported as [`Error::DeviceNotFound`].
    pub fn open(mut transport: T) -> Result<Self, Error> {
        if let Err(e) = transport.probe() {
            warn!("Sensor probe failed: {}", e);
            return Err(Error::DeviceNotFound);
        }
        Ok(Self { handle: transport })
    }

    /// Read one sample. Blocking, no internal retry.
    pub fn read_axis(&mut self) -> Result<SensorSample, Error> {
        let raw = self.handle.read_x()?;
        Ok(SensorSample(raw))
    }

    /// Borrow the underlying transport.
    pub fn transport(&self) -> &T {
        &self.handle
    }
}
