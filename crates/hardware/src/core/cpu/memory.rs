//! CPU Bus Interface.
//!
//! The CPU drives two request ports that the tile connects to its L1 caches:
//! 1. **Instruction side:** a word read at the fetch PC, presented every cycle.
//! 2. **Data side:** the load or store in EX/MEM, held until the cache answers.
//!
//! Both requests depend only on latched state, so the tile can evaluate the
//! whole memory hierarchy before the CPU's clock edge.

use super::Cpu;
use crate::common::bus::BusRequest;

impl Cpu {
    /// Instruction-side request for this cycle.
    pub const fn fetch_request(&self) -> BusRequest {
        self.frontend.request()
    }

    /// Data-side request for this cycle, if EX/MEM accesses memory.
    pub const fn data_request(&self) -> Option<BusRequest> {
        self.backend.data_request()
    }
}
