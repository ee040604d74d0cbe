//! Push-button event latch.
//!
//! The button interrupt and the control loop rendezvous through a single
//! atomic word. The interrupt ORs newly captured edges in, the control
//! loop swaps the word back to zero. Both sides are one atomic
//! read-modify-write, so an edge arriving between the loop's read and its
//! clear cannot be dropped.
//!
//! `portable-atomic` provides the word. On cores without atomic RMW
//! instructions (ARMv6-M) its `critical-section` backend masks interrupts
//! around each operation instead.
//!
//! Alongside the latch, every serviced capture is queued on a
//! [`CaptureQueue`] so the loop can report presses one by one. The latch
//! stays the event signal; the queue only carries the detail. A full queue
//! drops the capture and counts it on the latch.

use core::fmt;

use heapless::spsc::{Consumer, Producer, Queue};
use portable_atomic::{AtomicU32, Ordering};

use crate::config::CAPTURE_QUEUE_LEN;

/// Single-producer single-consumer queue of individual captures.
///
/// Holds `CAPTURE_QUEUE_LEN - 1` entries.
pub type CaptureQueue = Queue<ButtonMask, CAPTURE_QUEUE_LEN>;
/// Interrupt-side half of a [`CaptureQueue`].
pub type CaptureProducer<'q> = Producer<'q, ButtonMask, CAPTURE_QUEUE_LEN>;
/// Loop-side half of a [`CaptureQueue`].
pub type CaptureConsumer<'q> = Consumer<'q, ButtonMask, CAPTURE_QUEUE_LEN>;

/// Physical push-buttons and their edge-capture bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Key0,
    Key1,
}

impl Button {
    pub const ALL: [Button; 2] = [Button::Key0, Button::Key1];

    pub const fn mask(self) -> ButtonMask {
        match self {
            Button::Key0 => ButtonMask(0x01),
            Button::Key1 => ButtonMask(0x02),
        }
    }
}

/// Sticky set of buttons that fired, one bit per line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(pub u32);

impl ButtonMask {
    pub const EMPTY: ButtonMask = ButtonMask(0);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.mask().0 != 0
    }
}

impl core::ops::BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}

impl fmt::LowerHex for ButtonMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Observable state of a [`ButtonEventLatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LatchState {
    /// No edge since the last drain.
    Idle,
    /// At least one edge waiting to be drained.
    Pending,
}

/// Edge-triggered sticky bitmask shared between interrupt and main context.
///
/// Exposes only [`merge`](Self::merge) for the producer and
/// [`take`](Self::take) for the consumer. There is no raw store.
pub struct ButtonEventLatch {
    bits: AtomicU32,
    dropped: AtomicU32,
}

impl ButtonEventLatch {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Producer side. OR `mask` into the pending set.
    pub fn merge(&self, mask: ButtonMask) {
        if mask.is_empty() {
            return;
        }
        self.bits.fetch_or(mask.bits(), Ordering::AcqRel);
    }

    /// Consumer side. Atomically take every pending bit and return to idle.
    ///
    /// `None` when the latch was already idle.
    pub fn take(&self) -> Option<ButtonMask> {
        match self.bits.swap(0, Ordering::AcqRel) {
            0 => None,
            bits => Some(ButtonMask(bits)),
        }
    }

    /// Producer side. Count a capture that did not fit in the capture queue.
    pub fn note_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::AcqRel);
    }

    /// Consumer side. Captures dropped since the last call.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::AcqRel)
    }

    pub fn state(&self) -> LatchState {
        if self.bits.load(Ordering::Acquire) == 0 {
            LatchState::Idle
        } else {
            LatchState::Pending
        }
    }
}

impl Default for ButtonEventLatch {
    fn default() -> Self {
        Self::new()
    }
}
