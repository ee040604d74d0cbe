//! JTAG UART operator console.
//!
//! ```text
//! 0x00  DATA     [7:0] byte, [15] RVALID, [31:16] RAVAIL
//! 0x04  CONTROL  [31:16] WSPACE
//! ```

use core::fmt;

use playerpad::config::CONSOLE_WRITE_SPIN_LIMIT;
use playerpad::Console;

use super::{read_reg, write_reg};

const DATA: usize = 0x00;
const CONTROL: usize = 0x04;

const RVALID: u32 = 1 << 15;
const WSPACE_SHIFT: u32 = 16;

pub struct JtagUart {
    base: usize,
}

impl JtagUart {
    /// # Safety
    /// `base` must be the base of a JTAG UART core, owned by nothing else.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Queue one byte, giving up after a bounded wait for FIFO space.
    fn put(&mut self, byte: u8) -> bool {
        for _ in 0..CONSOLE_WRITE_SPIN_LIMIT {
            // SAFETY: see `new`.
            let space = unsafe { read_reg(self.base, CONTROL) } >> WSPACE_SHIFT;
            if space > 0 {
                // SAFETY: see `new`.
                unsafe { write_reg(self.base, DATA, u32::from(byte)) };
                return true;
            }
            core::hint::spin_loop();
        }
        false
    }
}

impl fmt::Write for JtagUart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if !self.put(byte) {
                // No host draining the FIFO.
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}

impl Console for JtagUart {
    fn read_byte(&mut self) -> Option<u8> {
        // SAFETY: see `new`. Reading DATA pops the byte it reports.
        let word = unsafe { read_reg(self.base, DATA) };
        if word & RVALID != 0 {
            Some(word as u8)
        } else {
            None
        }
    }
}
