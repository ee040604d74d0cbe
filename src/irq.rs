//! Button interrupt bridge.
//!
//! Connects the button PIO's edge-capture register to the
//! [`ButtonEventLatch`]. Setup masks the button lines in, clears stale
//! captures and installs a handler through the platform's
//! [`IrqRegistry`]. The handler itself calls [`InterruptBridge::service`].
//!
//! `service` runs in interrupt context: it never blocks, never logs to
//! the console, touches the latch with a single atomic OR and hands the
//! capture to the loop through a [`CaptureProducer`].

use crate::error::{Error, IrqRegistrationError};
use crate::ui::buttons::{ButtonEventLatch, ButtonMask, CaptureProducer};

/// Interrupt controller line number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqLine(pub u16);

impl IrqLine {
    pub const fn number(self) -> u16 {
        self.0
    }
}

/// Edge-capture PIO serving the buttons.
pub trait EdgeCapture {
    /// Read the edge-capture register.
    fn captured(&mut self) -> u32;

    /// Clear exactly `bits` in the edge-capture register.
    fn acknowledge(&mut self, bits: u32);

    /// Set the per-line interrupt enable mask.
    fn set_irq_mask(&mut self, bits: u32);
}

/// Platform table mapping interrupt lines to handlers.
pub trait IrqRegistry {
    /// Install `handler` for `line` and enable the line.
    fn register(&mut self, line: IrqLine, handler: fn()) -> Result<(), IrqRegistrationError>;
}

/// Whether button edges reach the latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonMode {
    /// Handler installed, lines unmasked.
    Responsive,
    /// Registration failed; the latch never leaves idle.
    Inert,
}

/// Producer half of the button latch.
pub struct InterruptBridge<'a> {
    latch: &'a ButtonEventLatch,
}

impl<'a> InterruptBridge<'a> {
    pub const fn new(latch: &'a ButtonEventLatch) -> Self {
        Self { latch }
    }

    /// Unmask `lines`, drop stale captures and install `handler` on `irq`.
    ///
    /// If registration fails the lines are masked again.
    pub fn configure<P, R>(
        &self,
        pio: &mut P,
        registry: &mut R,
        irq: IrqLine,
        lines: u32,
        handler: fn(),
    ) -> Result<(), Error>
    where
        P: EdgeCapture,
        R: IrqRegistry,
    {
        pio.set_irq_mask(lines);
        pio.acknowledge(lines);
        if let Err(e) = registry.register(irq, handler) {
            pio.set_irq_mask(0);
            return Err(e.into());
        }
        debug!("Button lines {=u32:x} armed on IRQ {}", lines, irq.number());
        Ok(())
    }

    /// Interrupt body. Latch and queue whatever the PIO captured, then
    /// acknowledge it.
    ///
    /// A zero capture is spurious: nothing is latched, queued or
    /// acknowledged. A full queue drops the capture but the latch still
    /// records its bits.
    pub fn service<P: EdgeCapture>(
        &self,
        pio: &mut P,
        captures: &mut CaptureProducer<'_>,
    ) -> Option<ButtonMask> {
        let captured = pio.captured();
        if captured == 0 {
            return None;
        }

        trace!("B {=u32:x}", captured);
        let mask = ButtonMask(captured);
        self.latch.merge(mask);
        if captures.enqueue(mask).is_err() {
            self.latch.note_dropped();
        }
        pio.acknowledge(captured);
        Some(mask)
    }
}
