//! Core Tile.
//!
//! A tile is one hart together with its private memory side: the CPU, an L1
//! instruction cache, an L1 data cache and the [`L1Arbiter`] that merges the
//! two caches onto the tile's single bus master port.
//!
//! Each cycle is split in two, matching the rest of the chip:
//! 1. [`CoreTile::master_request`] derives the master-port request from latched
//!    state only, so the shared memory side can answer it before any edge.
//! 2. [`CoreTile::clock`] routes the master-port response up through the
//!    arbiter and caches to the CPU, then clocks every component.

use crate::common::bus::{BusRequest, BusResponse};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::backend::CycleEvent;
use crate::core::units::cache::{Cache, Cacheable};
use crate::soc::interconnect::L1Arbiter;
use crate::stats::SimStats;

/// Requests on every port of the tile for one cycle.
#[derive(Clone, Copy, Debug)]
struct TileRequests {
    fetch: BusRequest,
    data: Option<BusRequest>,
    l1_i: Option<BusRequest>,
    l1_d: Option<BusRequest>,
}

/// One hart with private L1 caches.
#[derive(Debug)]
pub struct CoreTile {
    /// The processor.
    pub cpu: Cpu,
    l1_i: Cache,
    l1_d: Cache,
    arbiter: L1Arbiter,
}

impl CoreTile {
    /// Creates a tile in its reset state.
    ///
    /// # Arguments
    ///
    /// * `hart_id` - Index of this tile; becomes `mhartid`.
    /// * `config` - The simulator configuration parameters.
    pub fn new(hart_id: usize, config: &Config) -> Self {
        let cacheable = Cacheable {
            base: config.system.ram_base,
            size: config.system.ram_size as u64,
        };
        Self {
            cpu: Cpu::new(hart_id, config),
            l1_i: Cache::new("l1i", &config.cache.l1_i, cacheable),
            l1_d: Cache::new("l1d", &config.cache.l1_d, cacheable),
            arbiter: L1Arbiter::new(),
        }
    }

    fn requests(&self) -> TileRequests {
        let fetch = self.cpu.fetch_request();
        let data = self.cpu.data_request();
        TileRequests {
            fetch,
            data,
            l1_i: self.l1_i.request(Some(&fetch)),
            l1_d: self.l1_d.request(data.as_ref()),
        }
    }

    /// Master-port request for this cycle.
    pub fn master_request(&self) -> Option<BusRequest> {
        let req = self.requests();
        self.arbiter.request(req.l1_i.as_ref(), req.l1_d.as_ref())
    }

    /// Clock edge.
    ///
    /// # Arguments
    ///
    /// * `master` - The memory subsystem's answer to [`master_request`](Self::master_request).
    /// * `timer_irq` - Level of the shared timer interrupt line.
    ///
    /// # Returns
    ///
    /// How the CPU pipeline moved on this edge.
    pub fn clock(&mut self, master: BusResponse, timer_irq: bool) -> CycleEvent {
        let req = self.requests();
        let routed = self.arbiter.respond(master);
        let fetch_resp = self.l1_i.respond(Some(&req.fetch), routed.inst);
        let data_resp = self.l1_d.respond(req.data.as_ref(), routed.data);

        let event = self.cpu.clock(fetch_resp, data_resp, timer_irq);

        self.l1_i.clock(Some(&req.fetch), routed.inst);
        self.l1_d.clock(req.data.as_ref(), routed.data);
        self.arbiter.clock(req.l1_i.as_ref(), req.l1_d.as_ref(), master);
        event
    }

    /// L1 instruction cache.
    pub const fn l1_i(&self) -> &Cache {
        &self.l1_i
    }

    /// L1 data cache.
    pub const fn l1_d(&self) -> &Cache {
        &self.l1_d
    }

    /// L1 arbiter.
    pub const fn arbiter(&self) -> &L1Arbiter {
        &self.arbiter
    }

    /// CPU statistics with this tile's L1 counters filled in.
    pub fn stats(&self) -> SimStats {
        let mut stats = self.cpu.stats.clone();
        stats.l1_i = self.l1_i.stats;
        stats.l1_d = self.l1_d.stats;
        stats
    }
}
