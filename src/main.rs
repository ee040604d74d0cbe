//! playerpad - accelerometer + push-button controller for an FPGA soft core.
//!
//! Runs on a Cortex-M1 soft processor. Samples the ADXL345 X axis every
//! poll interval and streams it to the JTAG UART console, latches push-
//! button edges from interrupt context, and shows the player number on
//! the seven-segment bank.
//!
//! ## Contexts
//!
//! | Context          | Runs                        | Touches                       |
//! |------------------|-----------------------------|-------------------------------|
//! | Button interrupt | `on_button_edge`            | button PIO, `SHARED.buttons`  |
//! | Thread mode      | `ControlLoop::run`          | everything else               |

#![no_std]
#![no_main]

mod board;

use core::cell::RefCell;

use cortex_m_rt::entry;
use critical_section::Mutex;
use defmt::{error, info};
use {defmt_rtt as _, panic_probe as _};

use playerpad::config;
use playerpad::ui::{CaptureProducer, CaptureQueue};
use playerpad::{Board, ButtonWiring, ControlLoop, InterruptBridge, IrqLine, SharedState};

use board::accel::AccelerometerSpi;
use board::dispatch::DispatchTable;
use board::jtag_uart::JtagUart;
use board::pio::{ButtonPio, HexDisplay};
use board::systick::SysTickDelay;

static SHARED: SharedState = SharedState::new(config::PROCESSING_ON_BOOT);
static BUTTONS: InterruptBridge<'static> = InterruptBridge::new(&SHARED.buttons);
static CAPTURES: Mutex<RefCell<Option<CaptureProducer<'static>>>> =
    Mutex::new(RefCell::new(None));

/// Button PIO interrupt.
fn on_button_edge() {
    // SAFETY: the button PIO base comes from the system map.
    let mut pio = unsafe { ButtonPio::new(config::BUTTON_PIO_BASE) };
    critical_section::with(|cs| {
        if let Some(captures) = CAPTURES.borrow_ref_mut(cs).as_mut() {
            BUTTONS.service(&mut pio, captures);
        }
    });
}

#[entry]
fn main() -> ! {
    info!("playerpad {} starting", env!("CARGO_PKG_VERSION"));

    let Some(cp) = cortex_m::Peripherals::take() else {
        defmt::panic!("core peripherals already taken");
    };

    let Some(queue) = cortex_m::singleton!(: CaptureQueue = CaptureQueue::new()) else {
        defmt::panic!("capture queue already taken");
    };
    let (producer, consumer) = queue.split();
    critical_section::with(|cs| CAPTURES.borrow(cs).replace(Some(producer)));

    let delay = SysTickDelay::new(cp.SYST, config::SYSCLK_HZ);
    let mut registry = DispatchTable::new(cp.NVIC, config::BUTTON_IRQ_PRIORITY);

    // SAFETY: every base address comes from the system map, and each
    // peripheral is handed out exactly once here (the button PIO is also
    // viewed from `on_button_edge`, which only touches edge capture).
    let (sensor, display, console, mut buttons) = unsafe {
        (
            AccelerometerSpi::new(config::ACCELEROMETER_SPI_BASE),
            HexDisplay::new(config::HEX_PIO_BASES),
            JtagUart::new(config::JTAG_UART_BASE),
            ButtonPio::new(config::BUTTON_PIO_BASE),
        )
    };

    let board = Board {
        sensor,
        display,
        console,
        delay,
    };
    let wiring = ButtonWiring {
        pio: &mut buttons,
        registry: &mut registry,
        irq: IrqLine(config::BUTTON_IRQ),
        lines: config::BUTTON_LINE_MASK,
        handler: on_button_edge,
    };

    match ControlLoop::init(board, &SHARED, consumer, wiring) {
        Ok(control) => {
            info!("Entering control loop");
            control.run()
        }
        Err(e) => {
            // panic-probe turns this into a failing exit for the debug probe.
            error!("Startup failed: {}", e);
            defmt::panic!("fatal init error");
        }
    }
}
