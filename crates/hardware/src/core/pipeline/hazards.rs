//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Identifies load-use hazards that require a one-cycle stall.
//! 2. **Operand Forwarding:** Resolves Read-After-Write (RAW) hazards by bypassing the
//!    register file from EX/MEM (highest priority) or MEM/WB.
//! 3. **CSR Forwarding:** Composes the pending CSR effects of EX/MEM and MEM/WB over
//!    the committed CSR value, the more recent effect applied last.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::isa::instruction::InstructionBits;

/// Forwarding multiplexer select, encoded as the classic 2-bit code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ForwardSel {
    /// Register-file value.
    #[default]
    RegFile = 0b00,
    /// MEM/WB result ("MEM hazard").
    MemWb = 0b01,
    /// EX/MEM result ("EX hazard").
    ExMem = 0b10,
}

impl ForwardSel {
    /// Returns the 2-bit code.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Load-use condition on raw register indices.
///
/// # Arguments
///
/// * `ex_mem_read` - The instruction in Execute is a load.
/// * `ex_rd` - Its destination register.
/// * `id_rs1` - First source field of the instruction in Decode.
/// * `id_rs2` - Second source field of the instruction in Decode.
pub const fn load_use_hazard(
    ex_mem_read: bool,
    ex_rd: usize,
    id_rs1: usize,
    id_rs2: usize,
) -> bool {
    ex_mem_read && ex_rd != 0 && (ex_rd == id_rs1 || ex_rd == id_rs2)
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// The Decode instruction's source fields are taken from the raw encoding, so
/// formats without an rs2 may stall conservatively.
///
/// ```ignore
/// // ID/EX stage: lw x1, 0(x2)    <- loads into x1 (in execute)
/// // IF/ID stage: add x3, x1, x4  <- uses x1 (in decode)
/// assert!(need_stall_load_use(&id_ex, &if_id));
/// ```
pub fn need_stall_load_use(id_ex: &IdExEntry, if_id: &IfIdEntry) -> bool {
    id_ex.valid
        && load_use_hazard(
            id_ex.ctrl.mem_read,
            id_ex.rd(),
            if_id.inst.rs1(),
            if_id.inst.rs2(),
        )
}

/// Selects the forwarding source for one operand.
///
/// # Arguments
///
/// * `rs` - Source register index of the Execute instruction.
/// * `ex_mem_rd`, `ex_mem_we` - Destination and write enable in EX/MEM.
/// * `mem_wb_rd`, `mem_wb_we` - Destination and write enable in MEM/WB.
///
/// Register `x0` is never forwarded.
pub const fn forward_select(
    rs: usize,
    ex_mem_rd: usize,
    ex_mem_we: bool,
    mem_wb_rd: usize,
    mem_wb_we: bool,
) -> ForwardSel {
    if rs == 0 {
        ForwardSel::RegFile
    } else if ex_mem_we && ex_mem_rd == rs {
        ForwardSel::ExMem
    } else if mem_wb_we && mem_wb_rd == rs {
        ForwardSel::MemWb
    } else {
        ForwardSel::RegFile
    }
}

/// Resolves the value of source register `rs` for the Execute stage.
///
/// # Arguments
///
/// * `rs` - Source register index.
/// * `rv` - Value read in Decode.
/// * `ex_mem` - The EX/MEM latch.
/// * `mem_wb` - The MEM/WB latch.
pub fn forward_operand(rs: usize, rv: u32, ex_mem: &ExMemEntry, mem_wb: &MemWbEntry) -> u32 {
    match forward_select(
        rs,
        ex_mem.rd,
        ex_mem.writes_rd(),
        mem_wb.rd,
        mem_wb.writes_rd(),
    ) {
        ForwardSel::ExMem => ex_mem.result,
        ForwardSel::MemWb => mem_wb.wb_value(),
        ForwardSel::RegFile => rv,
    }
}

/// Resolves the value of the CSR at `addr` for the Execute stage.
///
/// `committed` is the CSR file's current value. MEM/WB's pending effect is
/// applied first, then EX/MEM's, so the most recent write wins.
pub fn forward_csr(addr: u32, committed: u32, ex_mem: &ExMemEntry, mem_wb: &MemWbEntry) -> u32 {
    let older = mem_wb.pending_csr().apply(addr, committed);
    if ex_mem.valid {
        ex_mem.csr.apply(addr, older)
    } else {
        older
    }
}
