//! System interconnect.
//!
//! This module holds the components that route and share bus traffic. It provides:
//! 1. **System bus:** Address decode from the shared L2 to main memory and the
//!    MMIO devices, answered in the same cycle.
//! 2. **L1 arbiter:** Per-tile selection between the instruction and data caches.
//! 3. **Bus arbiter:** Round-robin selection between tiles in front of the L2.

/// Round-robin arbiter between core tiles.
pub mod bus_arbiter;

/// Data-priority arbiter between a tile's L1 caches.
pub mod l1_arbiter;

pub use bus_arbiter::BusArbiter;
pub use l1_arbiter::L1Arbiter;

use crate::common::bus::{BusRequest, BusResponse};
use crate::soc::devices::{Device, Timer, Uart};
use crate::soc::memory::MainMemory;

/// System bus connecting the memory hierarchy to RAM and devices.
///
/// Holds a list of devices sorted by base address. Every access completes in
/// the cycle it is presented; accesses that decode to no device read as zero,
/// drop their write data and log a warning.
#[derive(Debug, Default)]
pub struct SystemBus {
    devices: Vec<Box<dyn Device>>,
}

impl SystemBus {
    /// Creates an empty bus; add devices with [`add_device`](Self::add_device).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device; devices are kept sorted by base address.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
    }

    /// Word-aligned offset of `addr` inside `dev`. Only called for addresses
    /// the device contains, so `addr >= base` even when the base is not
    /// word-aligned.
    fn offset(dev: &dyn Device, addr: u32) -> u32 {
        let (base, _) = dev.address_range();
        (addr - base) & !3
    }

    fn find_device(&self, addr: u32) -> Option<&dyn Device> {
        self.devices
            .iter()
            .find(|d| d.contains(addr))
            .map(|d| d.as_ref())
    }

    fn find_device_mut(&mut self, addr: u32) -> Option<&mut Box<dyn Device>> {
        self.devices.iter_mut().find(|d| d.contains(addr))
    }

    /// Response to `req` for this cycle.
    pub fn respond(&self, req: Option<&BusRequest>) -> BusResponse {
        let Some(req) = req else {
            return BusResponse::IDLE;
        };
        if req.write {
            return BusResponse::ready(0);
        }
        let rdata = self
            .find_device(req.addr)
            .map_or(0, |dev| dev.read_word(Self::offset(dev, req.addr)));
        BusResponse::ready(rdata)
    }

    /// Clock edge: commits a write presented this cycle, then ticks every device.
    pub fn clock(&mut self, req: Option<&BusRequest>) {
        if let Some(req) = req {
            match self.find_device_mut(req.addr) {
                Some(dev) if req.write => {
                    let offset = Self::offset(dev.as_ref(), req.addr);
                    dev.write_word(offset, req.wdata, req.byte_enable);
                }
                Some(_) => {}
                None => tracing::warn!(
                    addr = format_args!("{:#010x}", req.addr),
                    write = req.write,
                    "access to unmapped address"
                ),
            }
        }
        for dev in &mut self.devices {
            dev.tick();
        }
    }

    /// OR of every device interrupt line.
    pub fn irq(&self) -> bool {
        self.devices.iter().any(|d| d.irq())
    }

    /// Main memory, if attached.
    pub fn memory(&self) -> Option<&MainMemory> {
        self.devices.iter().find_map(|d| d.as_memory())
    }

    /// Mutable main memory, if attached.
    pub fn memory_mut(&mut self) -> Option<&mut MainMemory> {
        self.devices.iter_mut().find_map(|d| d.as_memory_mut())
    }

    /// The UART, if attached.
    pub fn uart(&self) -> Option<&Uart> {
        self.devices.iter().find_map(|d| d.as_uart())
    }

    /// The timer, if attached.
    pub fn timer(&self) -> Option<&Timer> {
        self.devices.iter().find_map(|d| d.as_timer())
    }
}
