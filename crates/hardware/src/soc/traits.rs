//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by every component on the
//! system bus. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Word reads and byte-enabled word writes at device-relative offsets.
//! 3. **Lifecycle:** `tick` once per cycle and a level-sensitive interrupt line.
//! 4. **Downcasting:** Casts to [`Uart`], [`Timer`] and [`MainMemory`] for the debug API.

use std::fmt::Debug;

use crate::soc::devices::{Timer, Uart};
use crate::soc::memory::MainMemory;

/// Trait for memory-mapped devices attached to the system bus.
///
/// Reads are combinational and must not change device state; writes are
/// applied on the clock edge of the cycle in which the bus answered them.
pub trait Device: Debug + Send + Sync {
    /// Returns a short name for this device (e.g., `"UART"`, `"RAM"`).
    fn name(&self) -> &str;

    /// Returns (base_address, size_in_bytes) for this device's region.
    fn address_range(&self) -> (u32, u64);

    /// Reads the word at the given word-aligned offset.
    fn read_word(&self, offset: u32) -> u32;

    /// Writes the lanes of `wdata` selected by `byte_enable` at the given word-aligned offset.
    fn write_word(&mut self, offset: u32, wdata: u32, byte_enable: u8);

    /// Advances device state by one cycle.
    fn tick(&mut self) {}

    /// Current level of this device's interrupt line.
    fn irq(&self) -> bool {
        false
    }

    /// Returns `true` if `addr` falls inside this device's region.
    fn contains(&self, addr: u32) -> bool {
        let (base, size) = self.address_range();
        addr >= base && u64::from(addr - base) < size
    }

    /// Returns a reference as `Uart` if this device is the UART; otherwise `None`.
    fn as_uart(&self) -> Option<&Uart> {
        None
    }
    /// Returns a reference as `Timer` if this device is the timer; otherwise `None`.
    fn as_timer(&self) -> Option<&Timer> {
        None
    }
    /// Returns a reference as `MainMemory` if this device is RAM; otherwise `None`.
    fn as_memory(&self) -> Option<&MainMemory> {
        None
    }
    /// Returns a mutable reference as `MainMemory` if this device is RAM; otherwise `None`.
    fn as_memory_mut(&mut self) -> Option<&mut MainMemory> {
        None
    }
}
