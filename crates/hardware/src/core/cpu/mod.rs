//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the processor half of a
//! core tile. It coordinates the following:
//! 1. **State Management:** Register file, CSR file and hart identity.
//! 2. **Pipeline Control:** The [`Frontend`] (PC, IF/ID, predictor) and the
//!    [`Backend`] (ID/EX, EX/MEM, MEM/WB, MDU).
//! 3. **Bus Interface:** One instruction and one data request per cycle, answered
//!    by the tile's L1 caches before the clock edge.
//! 4. **Observability:** Statistics and read-only debug accessors.

/// Per-cycle orchestration of the two-pass pipeline update.
pub mod execution;

/// Instruction- and data-side bus requests.
pub mod memory;

/// Retirement accounting, trap bookkeeping and the commit log.
pub mod trap;

use crate::config::Config;
use crate::core::arch::csr::CsrFile;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::backend::Backend;
use crate::core::pipeline::frontend::Frontend;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
#[derive(Debug)]
pub struct Cpu {
    /// General Purpose Registers.
    pub regs: Gpr,
    /// Control and Status Registers.
    pub csrs: CsrFile,
    /// Fetch unit: PC, IF/ID latch, branch predictor.
    pub frontend: Frontend,
    /// Decode through Writeback.
    pub backend: Backend,
    /// Hart index (`mhartid`).
    pub hart_id: usize,
    /// Enable the per-instruction commit log.
    pub trace: bool,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU in its reset state.
    ///
    /// # Arguments
    ///
    /// * `hart_id` - Value of `mhartid`.
    /// * `config` - The simulator configuration parameters.
    pub fn new(hart_id: usize, config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            csrs: CsrFile::new(hart_id as u32),
            frontend: Frontend::new(config),
            backend: Backend::new(config.pipeline.mdu_latency),
            hart_id,
            trace: config.general.trace_instructions,
            stats: SimStats::default(),
        }
    }

    /// Current fetch PC.
    pub const fn pc(&self) -> u32 {
        self.frontend.pc()
    }

    /// Reads a CSR as software would see it from the committed state, with
    /// `mip.MTIP` taken from the live `timer_irq` line.
    pub const fn read_csr(&self, addr: u32, timer_irq: bool) -> u32 {
        self.csrs.read(addr, timer_irq)
    }

    /// PC of the instruction in each stage (`None` for a bubble):
    /// `[IF/ID, ID/EX, EX/MEM, MEM/WB]`.
    pub const fn stage_pcs(&self) -> [Option<u32>; 4] {
        let if_id = &self.frontend.if_id;
        let b = &self.backend;
        [
            if if_id.valid { Some(if_id.pc) } else { None },
            if b.id_ex.valid { Some(b.id_ex.pc) } else { None },
            if b.ex_mem.valid { Some(b.ex_mem.pc) } else { None },
            if b.mem_wb.valid { Some(b.mem_wb.pc) } else { None },
        ]
    }

    /// PC and encoding of the instruction in Execute, if any.
    pub const fn execute_stage(&self) -> Option<(u32, u32)> {
        let id_ex = &self.backend.id_ex;
        if id_ex.valid {
            Some((id_ex.pc, id_ex.decoded.raw))
        } else {
            None
        }
    }
}
