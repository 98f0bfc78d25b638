//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. It performs the following:
//! 1. **Request Generation:** Presents the EX/MEM load or store on the data bus.
//! 2. **Completion:** Reports whether the data side answered this cycle; when it
//!    did not, the backend freezes the whole pipeline.
//! 3. **Load Extraction:** Steers and extends the loaded lane via the LSU.

use crate::common::bus::{BusRequest, BusResponse};
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::units::lsu::Lsu;
use crate::isa::instruction::InstructionBits;

/// Data-side bus request for the instruction in EX/MEM, if it accesses memory.
pub const fn data_request(ex_mem: &ExMemEntry) -> Option<BusRequest> {
    if !ex_mem.is_mem_op() {
        return None;
    }
    if ex_mem.ctrl.mem_write {
        Some(BusRequest::write(
            ex_mem.result,
            ex_mem.store.wdata,
            ex_mem.store.byte_enable,
        ))
    } else {
        Some(BusRequest::read(ex_mem.result))
    }
}

/// Output of the memory stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryOutcome {
    /// The data side is not ready (`bus_busy`): the pipeline must hold.
    pub busy: bool,
    /// The MEM/WB entry for the next edge.
    pub entry: MemWbEntry,
}

/// Executes the memory stage.
///
/// # Arguments
///
/// * `ex_mem` - The EX/MEM latch.
/// * `response` - This cycle's answer from the L1 data cache.
pub fn memory_stage(ex_mem: &ExMemEntry, response: BusResponse) -> MemoryOutcome {
    let busy = ex_mem.is_mem_op() && !response.ready;
    let load_data = if ex_mem.valid && ex_mem.ctrl.mem_read {
        Lsu::load_extract(ex_mem.result, ex_mem.inst.funct3(), response.rdata)
    } else {
        0
    };
    MemoryOutcome {
        busy,
        entry: MemWbEntry {
            valid: ex_mem.valid,
            retired: false,
            pc: ex_mem.pc,
            inst: ex_mem.inst,
            rd: ex_mem.rd,
            result: ex_mem.result,
            load_data,
            ctrl: ex_mem.ctrl,
            csr: ex_mem.csr,
            trap: ex_mem.trap,
        },
    }
}
