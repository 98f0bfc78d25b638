//! Machine Timer.
//!
//! The timer block holds the 64-bit `mtime` counter and the 64-bit `mtimecmp`
//! compare register, each exposed as two 32-bit words. The interrupt request
//! is level-triggered and stays asserted while `mtime >= mtimecmp`.
//!
//! # Memory Map
//!
//! * `0x0`: MTIME (low word)
//! * `0x4`: MTIME (high word)
//! * `0x8`: MTIMECMP (low word)
//! * `0xC`: MTIMECMP (high word)

use crate::common::bus::merge_bytes;
use crate::soc::devices::Device;

/// Offset for the low word of the Machine Time register.
const MTIME_LO_OFFSET: u32 = 0x0;
/// Offset for the high word of the Machine Time register.
const MTIME_HI_OFFSET: u32 = 0x4;
/// Offset for the low word of the Machine Time Compare register.
const MTIMECMP_LO_OFFSET: u32 = 0x8;
/// Offset for the high word of the Machine Time Compare register.
const MTIMECMP_HI_OFFSET: u32 = 0xC;

/// Size of the register block in bytes.
const TIMER_SIZE: u64 = 0x10;

/// Replaces the low or high half of a 64-bit register.
const fn write_half(reg: u64, high: bool, wdata: u32, be: u8) -> u64 {
    if high {
        let old = (reg >> 32) as u32;
        (reg & 0xFFFF_FFFF) | ((merge_bytes(old, wdata, be) as u64) << 32)
    } else {
        let old = reg as u32;
        (reg & !0xFFFF_FFFF) | merge_bytes(old, wdata, be) as u64
    }
}

/// Timer device structure.
#[derive(Debug)]
pub struct Timer {
    /// Base physical address of the device.
    base_addr: u32,
    /// Current machine time counter.
    mtime: u64,
    /// Machine time compare register.
    mtimecmp: u64,
    /// Divider to scale clock cycles to timer ticks.
    divider: u64,
    /// Internal counter for the divider.
    counter: u64,
}

impl Timer {
    /// Creates a new timer device.
    ///
    /// `mtimecmp` resets to its maximum value, so no interrupt is requested
    /// until software programs it.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - The base physical address.
    /// * `divider` - Clock cycles per timer tick (1 means every cycle); 0 is treated as 1.
    pub fn new(base_addr: u32, divider: u64) -> Self {
        Self {
            base_addr,
            mtime: 0,
            mtimecmp: u64::MAX,
            divider: divider.max(1),
            counter: 0,
        }
    }

    /// Current value of `mtime`.
    pub const fn mtime(&self) -> u64 {
        self.mtime
    }

    /// Current value of `mtimecmp`.
    pub const fn mtimecmp(&self) -> u64 {
        self.mtimecmp
    }

    /// Level of the timer interrupt request.
    pub const fn interrupt_pending(&self) -> bool {
        self.mtime >= self.mtimecmp
    }
}

impl Device for Timer {
    fn name(&self) -> &str {
        "TIMER"
    }

    fn address_range(&self) -> (u32, u64) {
        (self.base_addr, TIMER_SIZE)
    }

    fn read_word(&self, offset: u32) -> u32 {
        match offset & !3 {
            MTIME_LO_OFFSET => self.mtime as u32,
            MTIME_HI_OFFSET => (self.mtime >> 32) as u32,
            MTIMECMP_LO_OFFSET => self.mtimecmp as u32,
            MTIMECMP_HI_OFFSET => (self.mtimecmp >> 32) as u32,
            _ => 0,
        }
    }

    fn write_word(&mut self, offset: u32, wdata: u32, byte_enable: u8) {
        match offset & !3 {
            MTIME_LO_OFFSET => self.mtime = write_half(self.mtime, false, wdata, byte_enable),
            MTIME_HI_OFFSET => self.mtime = write_half(self.mtime, true, wdata, byte_enable),
            MTIMECMP_LO_OFFSET => {
                self.mtimecmp = write_half(self.mtimecmp, false, wdata, byte_enable);
            }
            MTIMECMP_HI_OFFSET => {
                self.mtimecmp = write_half(self.mtimecmp, true, wdata, byte_enable);
            }
            _ => {}
        }
    }

    /// Increments `mtime` once every `divider` cycles.
    fn tick(&mut self) {
        self.counter += 1;
        if self.counter >= self.divider {
            self.counter = 0;
            self.mtime = self.mtime.wrapping_add(1);
        }
    }

    fn irq(&self) -> bool {
        self.interrupt_pending()
    }

    fn as_timer(&self) -> Option<&Timer> {
        Some(self)
    }
}

