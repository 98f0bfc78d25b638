//! Memory-Mapped IO Devices.
//!
//! This module contains the peripherals found on the system bus next to main
//! memory: the machine timer (`mtime`/`mtimecmp`) and a transmit-only UART.

/// Machine timer with a 64-bit `mtime` counter and `mtimecmp` compare register.
pub mod timer;

/// Byte-wide transmit-only serial port.
pub mod uart;

pub use timer::Timer;
pub use uart::Uart;

pub use crate::soc::traits::Device;
