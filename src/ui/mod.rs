//! User-facing hardware - seven-segment digits + physical buttons.
//!
//! ## Components
//!
//! - **Display**: six active-low seven-segment digits (HEX0..HEX5)
//! - **Buttons**: two push-buttons (KEY0, KEY1) with hardware edge capture

pub mod buttons;
pub mod display;

pub use buttons::{
    Button, ButtonEventLatch, ButtonMask, CaptureConsumer, CaptureProducer, CaptureQueue,
    LatchState,
};
pub use display::{DigitGlyph, DigitId, DisplayPanel, StatusMessage, DIGIT_COUNT};
