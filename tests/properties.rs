//! Property tests for the button latch and interrupt bridge.

use playerpad::ui::{ButtonEventLatch, ButtonMask, CaptureQueue, LatchState};
use playerpad::{EdgeCapture, InterruptBridge};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    /// Handler fire with this edge-capture value.
    Fire(u32),
    /// Control loop drain.
    Drain,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        // Mostly real button lines, sometimes spurious, sometimes wide.
        3 => (0u32..4).prop_map(Op::Fire),
        1 => any::<u32>().prop_map(Op::Fire),
        2 => Just(Op::Drain),
    ]
}

struct Pio {
    capture: u32,
    acks: u32,
    ack_calls: usize,
}

impl EdgeCapture for Pio {
    fn captured(&mut self) -> u32 {
        self.capture
    }

    fn acknowledge(&mut self, bits: u32) {
        self.ack_calls += 1;
        self.acks |= bits;
        self.capture &= !bits;
    }

    fn set_irq_mask(&mut self, _bits: u32) {}
}

proptest! {
    #[test]
    fn no_update_is_lost(ops in prop::collection::vec(op(), 0..64)) {
        let latch = ButtonEventLatch::new();
        let bridge = InterruptBridge::new(&latch);
        let mut queue = CaptureQueue::new();
        let (mut tx, mut rx) = queue.split();

        let mut fired = 0u32;
        let mut drained = 0u32;
        let mut serviced = Vec::new();
        let mut reported = Vec::new();
        for op in &ops {
            match *op {
                Op::Fire(capture) => {
                    let mut pio = Pio { capture, acks: 0, ack_calls: 0 };
                    if let Some(mask) = bridge.service(&mut pio, &mut tx) {
                        serviced.push(mask);
                    }
                    fired |= capture;
                    prop_assert_eq!(pio.acks, capture);
                }
                Op::Drain => {
                    if let Some(mask) = latch.take() {
                        prop_assert!(!mask.is_empty());
                        drained |= mask.bits();
                    }
                    prop_assert_eq!(latch.state(), LatchState::Idle);
                    reported.extend(core::iter::from_fn(|| rx.dequeue()));
                }
            }
        }

        let leftover = latch.take().map(ButtonMask::bits).unwrap_or(0);
        prop_assert_eq!(drained | leftover, fired);

        // Every serviced capture is either reported in order or counted as dropped.
        reported.extend(core::iter::from_fn(|| rx.dequeue()));
        let dropped = latch.take_dropped() as usize;
        prop_assert_eq!(reported.len() + dropped, serviced.len());
        if dropped == 0 {
            prop_assert_eq!(reported, serviced);
        }
    }

    #[test]
    fn drain_returns_exactly_what_was_merged_since_last_drain(
        masks in prop::collection::vec(1u32..=u32::MAX, 1..8)
    ) {
        let latch = ButtonEventLatch::new();
        let expected = masks.iter().fold(0, |acc, m| acc | m);
        for m in &masks {
            latch.merge(ButtonMask(*m));
        }
        prop_assert_eq!(latch.state(), LatchState::Pending);
        prop_assert_eq!(latch.take(), Some(ButtonMask(expected)));
        prop_assert_eq!(latch.state(), LatchState::Idle);
        prop_assert_eq!(latch.take(), None);
    }

    #[test]
    fn spurious_fire_leaves_latch_untouched(pending in any::<u32>()) {
        let latch = ButtonEventLatch::new();
        latch.merge(ButtonMask(pending));
        let bridge = InterruptBridge::new(&latch);
        let mut queue = CaptureQueue::new();
        let (mut tx, rx) = queue.split();

        let mut pio = Pio { capture: 0, acks: 0, ack_calls: 0 };
        prop_assert_eq!(bridge.service(&mut pio, &mut tx), None);
        prop_assert_eq!(pio.ack_calls, 0);
        prop_assert!(!rx.ready());

        let expected = if pending == 0 { None } else { Some(ButtonMask(pending)) };
        prop_assert_eq!(latch.take(), expected);
    }
}
