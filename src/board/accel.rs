//! ADXL345 behind the Altera UP accelerometer SPI core.
//!
//! The core hides the SPI framing behind two byte registers: write the
//! ADXL345 register number to ADDRESS, then read or write DATA.

use playerpad::{AxisTransport, TransportError};

const ADDRESS: usize = 0x00;
const DATA: usize = 0x01;

// ADXL345 registers
const DEVID: u8 = 0x00;
const DATAX0: u8 = 0x32;
const DATAX1: u8 = 0x33;

const ADXL345_DEVID: u8 = 0xE5;

pub struct AccelerometerSpi {
    base: usize,
}

impl AccelerometerSpi {
    /// # Safety
    /// `base` must be the base of the accelerometer SPI core, owned by
    /// nothing else.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    fn read_register(&mut self, reg: u8) -> u8 {
        // SAFETY: see `new`. The core stalls the bus until DATA is valid.
        unsafe {
            core::ptr::write_volatile((self.base + ADDRESS) as *mut u8, reg);
            core::ptr::read_volatile((self.base + DATA) as *const u8)
        }
    }
}

impl AxisTransport for AccelerometerSpi {
    fn probe(&mut self) -> Result<(), TransportError> {
        match self.read_register(DEVID) {
            ADXL345_DEVID => Ok(()),
            other => Err(TransportError::WrongDevice(other)),
        }
    }

    fn read_x(&mut self) -> Result<i32, TransportError> {
        let lo = self.read_register(DATAX0);
        let hi = self.read_register(DATAX1);
        Ok(i32::from(i16::from_le_bytes([lo, hi])))
    }
}
