//! Parallel I/O cores: the HEX digit outputs and the button input.
//!
//! Register map (word registers, byte offsets):
//! ```text
//! 0x00  DATA
//! 0x04  DIRECTION      (unused, fixed at synthesis)
//! 0x08  INTERRUPTMASK  one enable bit per input line
//! 0x0C  EDGECAPTURE    sticky; write 1 to clear a bit
//! ```
//! The button PIO is synthesised with per-bit edge-capture clearing.

use playerpad::ui::{DigitGlyph, DigitId, DisplayPanel, DIGIT_COUNT};
use playerpad::EdgeCapture;

use super::{read_reg, write_reg};

const DATA: usize = 0x00;
const INTERRUPTMASK: usize = 0x08;
const EDGECAPTURE: usize = 0x0C;

/// Six single-digit output PIOs driving the seven-segment bank.
pub struct HexDisplay {
    bases: [usize; DIGIT_COUNT],
}

impl HexDisplay {
    /// # Safety
    /// Every entry of `bases` must be the base of an output PIO, owned
    /// by nothing else.
    pub const unsafe fn new(bases: [usize; DIGIT_COUNT]) -> Self {
        Self { bases }
    }
}

impl DisplayPanel for HexDisplay {
    fn show(&mut self, digit: DigitId, glyph: DigitGlyph) {
        // SAFETY: bases were vouched for in `new`; DigitId is always in range.
        unsafe { write_reg(self.bases[digit.index()], DATA, u32::from(glyph.segments())) }
    }
}

/// Input PIO with edge capture wired to the push-buttons.
///
/// Stateless, so the interrupt handler and the init code can each build
/// their own view of the same core.
pub struct ButtonPio {
    base: usize,
}

impl ButtonPio {
    /// # Safety
    /// `base` must be the base of an input PIO with edge capture.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }
}

impl EdgeCapture for ButtonPio {
    fn captured(&mut self) -> u32 {
        // SAFETY: see `new`.
        unsafe { read_reg(self.base, EDGECAPTURE) }
    }

    fn acknowledge(&mut self, bits: u32) {
        // SAFETY: see `new`. Writing 1s clears only those capture bits.
        unsafe { write_reg(self.base, EDGECAPTURE, bits) }
    }

    fn set_irq_mask(&mut self, bits: u32) {
        // SAFETY: see `new`.
        unsafe { write_reg(self.base, INTERRUPTMASK, bits) }
    }
}
