//! Seven-segment status display.
//!
//! Six independently addressable digits, each taking one active-low
//! segment byte (bit 0 = segment a ... bit 6 = segment g, bit 7 = decimal
//! point). Register writes are an external collaborator behind
//! [`DisplayPanel`] and are assumed never to fail.

/// Number of addressable digit positions (HEX0..HEX5).
pub const DIGIT_COUNT: usize = 6;

/// Position of one digit on the bank, 0 = rightmost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitId(u8);

impl DigitId {
    /// `None` if `position` is not on the bank.
    pub const fn new(position: u8) -> Option<Self> {
        if (position as usize) < DIGIT_COUNT {
            Some(Self(position))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every position, rightmost first.
    pub fn all() -> impl Iterator<Item = DigitId> {
        (0..DIGIT_COUNT as u8).map(DigitId)
    }
}

/// Symbols the status display can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DigitGlyph {
    Blank = 0xFF,
    Zero = 0xC0,
    One = 0xF9,
    Two = 0xA4,
    P = 0x8C,
    Dash = 0xBF,
}

impl DigitGlyph {
    /// Active-low segment pattern for the digit register.
    pub const fn segments(self) -> u8 {
        self as u8
    }

    /// Glyph for a player number; numbers without a glyph show a dash.
    pub const fn for_player(player: u8) -> Self {
        match player {
            0 => DigitGlyph::Zero,
            1 => DigitGlyph::One,
            2 => DigitGlyph::Two,
            _ => DigitGlyph::Dash,
        }
    }
}

/// A bank of seven-segment digits.
pub trait DisplayPanel {
    /// Latch `glyph` onto `digit`. Visible immediately.
    fn show(&mut self, digit: DigitId, glyph: DigitGlyph);
}

/// One full frame for the bank, indexed by digit position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    glyphs: [DigitGlyph; DIGIT_COUNT],
}

impl StatusMessage {
    /// `"  P<n>  "`: the player marker on HEX3 and the player digit on HEX2.
    pub const fn player(player: u8) -> Self {
        let mut glyphs = [DigitGlyph::Blank; DIGIT_COUNT];
        glyphs[3] = DigitGlyph::P;
        glyphs[2] = DigitGlyph::for_player(player);
        Self { glyphs }
    }

    pub fn glyph(&self, digit: DigitId) -> DigitGlyph {
        self.glyphs[digit.index()]
    }

    /// Write every position of the frame, one `show` per digit.
    pub fn render<D: DisplayPanel>(&self, panel: &mut D) {
        for digit in DigitId::all() {
            panel.show(digit, self.glyph(digit));
        }
    }
}
