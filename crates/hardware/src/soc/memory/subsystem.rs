//! Memory Subsystem.
//!
//! Composes the shared half of the chip. Tile master requests enter the
//! [`BusArbiter`]; the granted request is served by the shared L2, whose
//! misses, writes and MMIO accesses go out on the [`SystemBus`] to main
//! memory, the UART and the timer.
//!
//! Evaluation follows the chip's two-pass rule: [`MemorySubsystem::evaluate`]
//! computes every request top-down and every response bottom-up from the
//! current state, and [`MemorySubsystem::clock`] commits all of them.

use crate::common::bus::{BusRequest, BusResponse};
use crate::config::Config;
use crate::core::units::cache::{Cache, CacheStats, Cacheable};
use crate::soc::devices::{Timer, Uart};
use crate::soc::interconnect::{BusArbiter, SystemBus};
use crate::soc::memory::MainMemory;

/// Combinational values of one cycle, captured for the clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryCycle {
    /// Request granted by the bus arbiter (L2 upstream).
    pub l2_upstream: Option<BusRequest>,
    /// Request issued by the L2 onto the system bus.
    pub l2_downstream: Option<BusRequest>,
    /// System bus response to the L2.
    pub bus_response: BusResponse,
    /// L2 response to the granted master.
    pub l2_response: BusResponse,
}

/// Bus arbiter, shared L2 and system bus.
#[derive(Debug)]
pub struct MemorySubsystem {
    arbiter: BusArbiter,
    l2: Cache,
    bus: SystemBus,
}

impl MemorySubsystem {
    /// Builds the subsystem for `masters` tiles.
    ///
    /// Attaches main memory, the UART and the timer at their configured
    /// addresses. Only the RAM window is cacheable.
    pub fn new(config: &Config, masters: usize) -> Self {
        let sys = &config.system;
        let cacheable = Cacheable {
            base: sys.ram_base,
            size: sys.ram_size as u64,
        };

        let mut bus = SystemBus::new();
        bus.add_device(Box::new(MainMemory::new(sys.ram_base, sys.ram_size)));
        bus.add_device(Box::new(Uart::new(sys.uart_base, sys.uart_echo)));
        bus.add_device(Box::new(Timer::new(sys.timer_base, sys.timer_divider)));

        Self {
            arbiter: BusArbiter::new(masters),
            l2: Cache::new("l2", &config.cache.l2, cacheable),
            bus,
        }
    }

    /// Computes this cycle's combinational values from the master requests.
    pub fn evaluate(&self, requests: &[Option<BusRequest>]) -> MemoryCycle {
        let l2_upstream = self.arbiter.request(requests);
        let l2_downstream = self.l2.request(l2_upstream.as_ref());
        let bus_response = self.bus.respond(l2_downstream.as_ref());
        let l2_response = self.l2.respond(l2_upstream.as_ref(), bus_response);
        MemoryCycle {
            l2_upstream,
            l2_downstream,
            bus_response,
            l2_response,
        }
    }

    /// Response seen by master `master` in `cycle`.
    pub fn respond(
        &self,
        requests: &[Option<BusRequest>],
        cycle: &MemoryCycle,
        master: usize,
    ) -> BusResponse {
        self.arbiter.respond(requests, master, cycle.l2_response)
    }

    /// Clock edge for the arbiter, the L2 and every device.
    pub fn clock(&mut self, requests: &[Option<BusRequest>], cycle: &MemoryCycle) {
        self.bus.clock(cycle.l2_downstream.as_ref());
        self.l2.clock(cycle.l2_upstream.as_ref(), cycle.bus_response);
        self.arbiter.clock(requests, cycle.l2_response);
    }

    /// Level of the timer interrupt line.
    pub fn timer_irq(&self) -> bool {
        self.bus.timer().is_some_and(Timer::interrupt_pending)
    }

    /// The system bus and its devices.
    pub const fn bus(&self) -> &SystemBus {
        &self.bus
    }

    /// Main memory.
    pub fn memory(&self) -> Option<&MainMemory> {
        self.bus.memory()
    }

    /// Mutable main memory, for backdoor loading.
    pub fn memory_mut(&mut self) -> Option<&mut MainMemory> {
        self.bus.memory_mut()
    }

    /// Shared L2 counters.
    pub const fn l2_stats(&self) -> CacheStats {
        self.l2.stats
    }

    /// The shared L2.
    pub const fn l2(&self) -> &Cache {
        &self.l2
    }

    /// The bus arbiter.
    pub const fn arbiter(&self) -> &BusArbiter {
        &self.arbiter
    }

    /// Invalidates every L2 line.
    pub fn invalidate_l2(&mut self) {
        self.l2.invalidate_all();
    }
}
