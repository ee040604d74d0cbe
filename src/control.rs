//! Cooperative control loop.
//!
//! `Init → Running`, and `Running` never ends. Each cycle:
//!
//! 1. apply any command the host sent on the console,
//! 2. if processing is enabled, read one accelerometer sample and report it,
//! 3. drain the button latch and, if it held anything, report each
//!    queued capture on its own line,
//! 4. sleep for [`POLL_INTERVAL_MS`](crate::config::POLL_INTERVAL_MS).
//!
//! The sleep goes through an injected [`DelayNs`], so a timer-driven
//! scheduler can replace the busy delay without touching this module.

use embedded_hal::delay::DelayNs;
use portable_atomic::{AtomicBool, Ordering};

use crate::config;
use crate::error::Error;
use crate::irq::{ButtonMode, EdgeCapture, InterruptBridge, IrqLine, IrqRegistry};
use crate::sensor::{AxisTransport, SensorPort, SensorSample};
use crate::telemetry::{emit, CommandReader, Console, HostCommand, Report};
use crate::ui::buttons::{Button, ButtonEventLatch, ButtonMask, CaptureConsumer};
use crate::ui::display::{DisplayPanel, StatusMessage};

/// Gate on accelerometer sampling, shared with interrupt context.
pub struct ProcessingFlag {
    enabled: AtomicBool,
}

impl ProcessingFlag {
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

/// Process-wide state touched from both interrupt and main context.
pub struct SharedState {
    pub buttons: ButtonEventLatch,
    pub processing: ProcessingFlag,
}

impl SharedState {
    pub const fn new(processing: bool) -> Self {
        Self {
            buttons: ButtonEventLatch::new(),
            processing: ProcessingFlag::new(processing),
        }
    }
}

/// Hardware collaborators the loop owns once running.
pub struct Board<T, D, C, Z> {
    pub sensor: T,
    pub display: D,
    pub console: C,
    pub delay: Z,
}

/// Everything needed to arm the button interrupt during init.
pub struct ButtonWiring<'w, P, R> {
    pub pio: &'w mut P,
    pub registry: &'w mut R,
    pub irq: IrqLine,
    pub lines: u32,
    pub handler: fn(),
}

/// What one cycle did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cycle {
    /// Sample read this cycle; `None` when processing is off or the read failed.
    pub sample: Option<SensorSample>,
    /// Buttons drained this cycle.
    pub buttons: Option<ButtonMask>,
    /// Individual captures reported this cycle.
    pub captures: usize,
}

/// The running control loop.
///
/// The display is only written during init and is not kept.
pub struct ControlLoop<'a, T, C, Z> {
    sensor: SensorPort<T>,
    console: C,
    delay: Z,
    shared: &'a SharedState,
    captures: CaptureConsumer<'a>,
    commands: CommandReader,
    button_mode: ButtonMode,
}

impl<'a, T, C, Z> ControlLoop<'a, T, C, Z>
where
    T: AxisTransport,
    C: Console,
    Z: DelayNs,
{
    /// Bring the system up.
    ///
    /// Opens the sensor (fatal on failure), renders the player status,
    /// then arms the buttons (non-fatal on failure). `captures` is the
    /// consumer half of the queue the button handler feeds.
    pub fn init<D, P, R>(
        board: Board<T, D, C, Z>,
        shared: &'a SharedState,
        captures: CaptureConsumer<'a>,
        wiring: ButtonWiring<'_, P, R>,
    ) -> Result<Self, Error>
    where
        D: DisplayPanel,
        P: EdgeCapture,
        R: IrqRegistry,
    {
        let Board {
            sensor,
            mut display,
            mut console,
            delay,
        } = board;

        emit(&mut console, Report::Banner);

        let sensor = match SensorPort::open(sensor) {
            Ok(port) => port,
            Err(e) => {
                error!("Accelerometer not found");
                emit(&mut console, Report::SensorMissing);
                return Err(e);
            }
        };
        info!("Accelerometer opened");

        emit(&mut console, Report::Initializing);
        StatusMessage::player(config::PLAYER_NUMBER).render(&mut display);

        let bridge = InterruptBridge::new(&shared.buttons);
        let button_mode = match bridge.configure(
            wiring.pio,
            wiring.registry,
            wiring.irq,
            wiring.lines,
            wiring.handler,
        ) {
            Ok(()) => {
                info!("Button ISR registered on IRQ {}", wiring.irq.number());
                emit(&mut console, Report::IsrRegistered);
                ButtonMode::Responsive
            }
            Err(e) => {
                warn!("Button ISR registration failed: {}", e);
                emit(&mut console, Report::IsrFailed);
                ButtonMode::Inert
            }
        };
        emit(&mut console, Report::IrqLine(wiring.irq));

        Ok(Self {
            sensor,
            console,
            delay,
            shared,
            captures,
            commands: CommandReader::new(),
            button_mode,
        })
    }

    /// Run one cycle, including the trailing sleep.
    pub fn step(&mut self) -> Cycle {
        if let Some(HostCommand::Start) = self.commands.poll(&mut self.console) {
            info!("Host requested start");
            self.shared.processing.enable();
        }

        let sample = if self.shared.processing.is_enabled() {
            match self.sensor.read_axis() {
                Ok(sample) => {
                    emit(&mut self.console, Report::Sample(sample));
                    Some(sample)
                }
                Err(e) => {
                    warn!("Skipping sample: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let buttons = self.shared.buttons.take();
        let captures = if buttons.is_some() {
            self.report_captures()
        } else {
            0
        };

        self.delay.delay_ms(config::POLL_INTERVAL_MS);

        Cycle {
            sample,
            buttons,
            captures,
        }
    }

    /// One `B` line per queued capture, oldest first.
    fn report_captures(&mut self) -> usize {
        let mut reported = 0;
        while let Some(capture) = self.captures.dequeue() {
            for button in Button::ALL {
                if capture.contains(button) {
                    debug!("{} pressed", button);
                }
            }
            emit(&mut self.console, Report::Buttons(capture));
            reported += 1;
        }

        let dropped = self.shared.buttons.take_dropped();
        if dropped > 0 {
            warn!("{} button captures dropped, queue full", dropped);
        }
        reported
    }

    /// Enter `Running` for good.
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }

    pub fn button_mode(&self) -> ButtonMode {
        self.button_mode
    }

    pub fn sensor(&self) -> &SensorPort<T> {
        &self.sensor
    }

    pub fn console(&self) -> &C {
        &self.console
    }
}
