//! Memory-mapped peripherals of the FPGA system.
//!
//! Each driver implements one of the library's collaborator traits.
//! Register access is raw volatile reads and writes at the base
//! addresses in [`playerpad::config`].

pub mod accel;
pub mod dispatch;
pub mod jtag_uart;
pub mod pio;
pub mod systick;

/// Read a 32-bit register at `base + offset`.
///
/// # Safety
/// `base + offset` must be a mapped, word-aligned peripheral register.
#[inline(always)]
unsafe fn read_reg(base: usize, offset: usize) -> u32 {
    core::ptr::read_volatile((base + offset) as *const u32)
}

/// Write a 32-bit register at `base + offset`.
///
/// # Safety
/// `base + offset` must be a mapped, word-aligned peripheral register.
#[inline(always)]
unsafe fn write_reg(base: usize, offset: usize, value: u32) {
    core::ptr::write_volatile((base + offset) as *mut u32, value)
}
