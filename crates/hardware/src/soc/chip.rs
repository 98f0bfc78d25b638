//! Chip Top.
//!
//! The whole simulated chip: `system.harts` core tiles sharing one memory
//! subsystem. A call to [`ChipTop::tick`] is one rising clock edge:
//! 1. **Requests (top-down):** every tile presents its master-port request,
//!    computed from latched state.
//! 2. **Responses (bottom-up):** the memory subsystem resolves arbitration, the
//!    L2 and the system bus, and each tile routes its answer to the CPU.
//! 3. **Commit:** every tile and then the memory subsystem is clocked with the
//!    values captured above, so no component observes another's next state.

use crate::common::bus::BusRequest;
use crate::common::error::{SimError, SimResult};
use crate::config::Config;
use crate::core::pipeline::backend::CycleEvent;
use crate::soc::memory::{MainMemory, MemorySubsystem};
use crate::soc::tile::CoreTile;
use crate::stats::SimStats;

/// N core tiles and the shared memory side.
#[derive(Debug)]
pub struct ChipTop {
    tiles: Vec<CoreTile>,
    memory: MemorySubsystem,
    cycles: u64,
}

impl ChipTop {
    /// Builds the chip described by `config` in its reset state.
    ///
    /// At least one tile is always created. Tile `i` reports `mhartid = i`.
    pub fn new(config: &Config) -> Self {
        let harts = config.system.harts.max(1);
        let tiles = (0..harts).map(|id| CoreTile::new(id, config)).collect();
        tracing::info!(harts, "chip reset");
        Self {
            tiles,
            memory: MemorySubsystem::new(config, harts),
            cycles: 0,
        }
    }

    /// Advances the chip by one clock cycle.
    ///
    /// # Returns
    ///
    /// The pipeline event of every tile, indexed by hart.
    pub fn tick(&mut self) -> Vec<CycleEvent> {
        let requests: Vec<Option<BusRequest>> =
            self.tiles.iter().map(CoreTile::master_request).collect();
        let cycle = self.memory.evaluate(&requests);
        let timer_irq = self.memory.timer_irq();

        let mut events = Vec::with_capacity(self.tiles.len());
        for (hart, tile) in self.tiles.iter_mut().enumerate() {
            let resp = self.memory.respond(&requests, &cycle, hart);
            events.push(tile.clock(resp, timer_irq));
        }
        self.memory.clock(&requests, &cycle);
        self.cycles += 1;
        events
    }

    /// Cycles simulated since reset.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Number of tiles.
    pub fn harts(&self) -> usize {
        self.tiles.len()
    }

    /// All tiles.
    pub fn tiles(&self) -> &[CoreTile] {
        &self.tiles
    }

    /// Tile `hart`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchHart`] if `hart` is out of range.
    pub fn tile(&self, hart: usize) -> SimResult<&CoreTile> {
        self.tiles.get(hart).ok_or(SimError::NoSuchHart(hart))
    }

    /// Mutable tile `hart`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchHart`] if `hart` is out of range.
    pub fn tile_mut(&mut self, hart: usize) -> SimResult<&mut CoreTile> {
        self.tiles.get_mut(hart).ok_or(SimError::NoSuchHart(hart))
    }

    /// The shared memory side.
    pub const fn memory(&self) -> &MemorySubsystem {
        &self.memory
    }

    /// Main memory, for backdoor inspection.
    pub fn main_memory(&self) -> Option<&MainMemory> {
        self.memory.memory()
    }

    /// Mutable main memory, for backdoor loading.
    pub fn main_memory_mut(&mut self) -> Option<&mut MainMemory> {
        self.memory.memory_mut()
    }

    /// Statistics of tile `hart`, including its caches and the shared L2.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchHart`] if `hart` is out of range.
    pub fn stats(&self, hart: usize) -> SimResult<SimStats> {
        let mut stats = self.tile(hart)?.stats();
        stats.l2 = self.memory.l2_stats();
        Ok(stats)
    }
}
