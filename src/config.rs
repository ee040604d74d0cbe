//! Application-wide constants and compile-time configuration.
//!
//! Peripheral base addresses, timing parameters, and boot defaults
//! live here so they can be tuned in one place. There is no runtime
//! configuration and nothing is persisted across resets.

// Control loop

/// Cooperative yield between control loop cycles (ms).
pub const POLL_INTERVAL_MS: u32 = 50;

/// Whether accelerometer sampling is enabled at boot.
pub const PROCESSING_ON_BOOT: bool = true;

/// Player number rendered on the seven-segment bank at boot.
pub const PLAYER_NUMBER: u8 = 2;

// Buttons

/// Edge-capture bits wired to physical push-buttons (KEY0, KEY1).
pub const BUTTON_LINE_MASK: u32 = 0x03;

/// NVIC line the button PIO interrupt is routed to.
pub const BUTTON_IRQ: u16 = 2;

/// Length of the per-capture queue between the button interrupt and the
/// loop. One slot stays free, so up to 7 captures per poll interval.
pub const CAPTURE_QUEUE_LEN: usize = 8;

/// NVIC priority for the button interrupt (ARMv6-M uses the top two bits).
pub const BUTTON_IRQ_PRIORITY: u8 = 0x80;

// Peripheral map (Platform Designer system, Cortex-M1 AHB-to-Avalon bridge)
//
//   HEX0..HEX5       → one 8-bit output PIO per digit, active-low segments
//   BUTTON           → 2-bit input PIO, falling-edge capture, IRQ 2
//   ACCELEROMETER    → Altera UP accelerometer SPI core (ADXL345)
//   JTAG_UART        → operator console

/// Base addresses of the HEX digit PIOs, indexed by digit position.
pub const HEX_PIO_BASES: [usize; 6] = [
    0x4000_0000,
    0x4000_0010,
    0x4000_0020,
    0x4000_0030,
    0x4000_0040,
    0x4000_0050,
];

/// Base address of the push-button PIO.
pub const BUTTON_PIO_BASE: usize = 0x4000_0100;

/// Base address of the accelerometer SPI core.
pub const ACCELEROMETER_SPI_BASE: usize = 0x4000_0200;

/// Base address of the JTAG UART used as the operator console.
pub const JTAG_UART_BASE: usize = 0x4000_0300;

/// Core clock feeding SysTick (Hz).
pub const SYSCLK_HZ: u32 = 50_000_000;

/// Polls of the JTAG UART write FIFO before a byte is dropped.
///
/// Bounds console writes when no host is attached to drain the FIFO.
pub const CONSOLE_WRITE_SPIN_LIMIT: u32 = 10_000;
