//! Board-independent core of the playerpad firmware.
//!
//! Everything here is free of register access so it can be tested on
//! the host. The firmware binary (`main.rs`, `embedded` feature) supplies
//! the memory-mapped implementations of the collaborator traits.
//!
//! Usage: `cargo test` (host) or
//! `cargo build --release --features embedded --target thumbv6m-none-eabi`
//!
//! ## Data flow
//!
//! ```text
//! button edge ─▶ InterruptBridge ─▶ ButtonEventLatch ─▶ ControlLoop
//!                        └────────▶ CaptureQueue ─────▶ ControlLoop ─▶ console
//! SensorPort ──────────────────────────────────────────▶ ControlLoop ─▶ console
//! ControlLoop ─▶ DisplayPanel
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod error;
pub mod irq;
pub mod sensor;
pub mod telemetry;
pub mod ui;

pub use control::{Board, ButtonWiring, ControlLoop, Cycle, ProcessingFlag, SharedState};
pub use error::{Error, IrqRegistrationError, TransportError};
pub use irq::{ButtonMode, EdgeCapture, InterruptBridge, IrqLine, IrqRegistry};
pub use sensor::{AxisTransport, SensorPort, SensorSample};
pub use telemetry::{Console, HostCommand, Report};
