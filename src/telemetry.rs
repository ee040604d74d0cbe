//! Operator console protocol.
//!
//! The console is a plain line-oriented text stream (JTAG UART on the
//! board). A host relay forwards it and parses the `A` (accelerometer)
//! and `B` (buttons) records; everything else is free text for a human.
//!
//! In the other direction the relay sends single-letter commands, one
//! per line.

use core::fmt;

use heapless::Vec;

use crate::irq::IrqLine;
use crate::sensor::SensorSample;
use crate::ui::buttons::ButtonMask;

/// Longest command line accepted from the host, newline excluded.
pub const COMMAND_LINE_CAPACITY: usize = 16;

/// Bidirectional operator console.
pub trait Console: fmt::Write {
    /// Non-blocking read of one byte sent by the host.
    fn read_byte(&mut self) -> Option<u8>;
}

/// One console record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    Banner,
    SensorMissing,
    Initializing,
    IsrRegistered,
    IsrFailed,
    IrqLine(IrqLine),
    Sample(SensorSample),
    Buttons(ButtonMask),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Banner => {
                f.write_str("FIR Filtering Enabled - Starting accelerometer processing...")
            }
            Report::SensorMissing => f.write_str("Error: Accelerometer SPI device not found."),
            Report::Initializing => f.write_str("Initializing FPGA..."),
            Report::IsrRegistered => f.write_str("Button ISR registered successfully."),
            Report::IsrFailed => f.write_str("Failed to register Button ISR!"),
            Report::IrqLine(line) => write!(f, "Button IRQ Registered: {}", line.number()),
            Report::Sample(s) => write!(f, "A {}", s.value()),
            Report::Buttons(mask) => write!(f, "B {:x}", mask),
        }
    }
}

/// Write `report` as one line. The stream is diagnostic; failures are dropped.
pub fn emit<W: fmt::Write>(console: &mut W, report: Report) {
    let _ = writeln!(console, "{}", report);
}

/// Commands the host relay can send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Start accelerometer processing.
    Start,
}

impl HostCommand {
    /// Parse one line, surrounding whitespace ignored.
    pub fn parse(line: &[u8]) -> Option<Self> {
        match line.trim_ascii() {
            b"S" => Some(HostCommand::Start),
            _ => None,
        }
    }
}

/// Assembles console bytes into command lines.
#[derive(Default)]
pub struct CommandReader {
    line: Vec<u8, COMMAND_LINE_CAPACITY>,
    overflowed: bool,
}

impl CommandReader {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte. Returns a command when it completes a recognised line.
    ///
    /// Lines longer than [`COMMAND_LINE_CAPACITY`] are discarded whole.
    pub fn push(&mut self, byte: u8) -> Option<HostCommand> {
        if byte == b'\n' || byte == b'\r' {
            let command = if self.overflowed {
                None
            } else {
                HostCommand::parse(&self.line)
            };
            if command.is_none() && !self.line.is_empty() {
                debug!("Ignoring console line of {} bytes", self.line.len());
            }
            self.line.clear();
            self.overflowed = false;
            return command;
        }

        if self.line.push(byte).is_err() {
            self.overflowed = true;
        }
        None
    }

    /// Drain every byte `console` has buffered, returning the last command seen.
    pub fn poll<C: Console>(&mut self, console: &mut C) -> Option<HostCommand> {
        let mut last = None;
        while let Some(byte) = console.read_byte() {
            if let Some(command) = self.push(byte) {
                last = Some(command);
            }
        }
        last
    }
}
