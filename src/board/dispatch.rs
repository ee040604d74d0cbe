//! Interrupt registration table.
//!
//! `cortex-m-rt` is built without a device crate, so every external
//! interrupt lands in `DefaultHandler`. The handler looks the line up in
//! a RAM table filled at init through [`IrqRegistry`] and calls the
//! registered function with interrupts still at the line's priority.

use core::cell::Cell;

use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::NVIC;
use cortex_m_rt::exception;
use critical_section::Mutex;
use defmt::{trace, warn};
use playerpad::{IrqLine, IrqRegistrationError, IrqRegistry};

/// External interrupt inputs configured on the Cortex-M1 core.
pub const IRQ_LINES: usize = 32;

static HANDLERS: Mutex<Cell<[Option<fn()>; IRQ_LINES]>> =
    Mutex::new(Cell::new([None; IRQ_LINES]));

#[derive(Clone, Copy)]
struct Line(u16);

// SAFETY: `number` returns the same value for a given `Line`, and lines
// are range-checked against IRQ_LINES before they reach the NVIC.
unsafe impl InterruptNumber for Line {
    fn number(self) -> u16 {
        self.0
    }
}

/// Owner of the NVIC while handlers are being installed.
pub struct DispatchTable {
    nvic: NVIC,
    priority: u8,
}

impl DispatchTable {
    pub fn new(nvic: NVIC, priority: u8) -> Self {
        Self { nvic, priority }
    }
}

impl IrqRegistry for DispatchTable {
    fn register(&mut self, line: IrqLine, handler: fn()) -> Result<(), IrqRegistrationError> {
        let number = line.number();
        critical_section::with(|cs| {
            let cell = HANDLERS.borrow(cs);
            let mut table = cell.get();
            let slot = table
                .get_mut(usize::from(number))
                .ok_or(IrqRegistrationError::LineOutOfRange(number))?;
            if slot.is_some() {
                return Err(IrqRegistrationError::AlreadyClaimed(number));
            }
            *slot = Some(handler);
            cell.set(table);
            Ok(())
        })?;

        // SAFETY: the handler is in the table before the line can fire, and
        // nothing else in the firmware relies on this line staying masked.
        unsafe {
            self.nvic.set_priority(Line(number), self.priority);
            NVIC::unmask(Line(number));
        }
        Ok(())
    }
}

#[exception]
unsafe fn DefaultHandler(irqn: i16) {
    let handler = usize::try_from(irqn).ok().and_then(|line| {
        critical_section::with(|cs| HANDLERS.borrow(cs).get().get(line).copied().flatten())
    });

    match handler {
        Some(handler) => {
            trace!("IRQ {}", irqn);
            handler();
        }
        None => warn!("Unhandled interrupt {}", irqn),
    }
}
