//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the pipeline. It commits, in
//! program order, the register write and the CSR effect (explicit write, trap
//! entry or MRET) of the instruction in MEM/WB. An entry already committed
//! during a data-bus freeze is marked retired and is not committed again.

use crate::core::arch::csr::CsrUpdate;
use crate::core::pipeline::backend::decode::RegWrite;
use crate::core::pipeline::latches::MemWbEntry;

/// Architectural effects committed on this edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritebackPort {
    /// Register-file write port.
    pub reg: Option<RegWrite>,
    /// CSR file commit.
    pub csr: CsrUpdate,
    /// An instruction completes (retires) on this edge.
    pub retire: bool,
}

/// Executes the writeback stage.
pub fn writeback_stage(mem_wb: &MemWbEntry) -> WritebackPort {
    if !mem_wb.valid || mem_wb.retired {
        return WritebackPort::default();
    }
    WritebackPort {
        reg: mem_wb.writes_rd().then(|| RegWrite {
            rd: mem_wb.rd,
            value: mem_wb.wb_value(),
        }),
        csr: mem_wb.csr,
        retire: mem_wb.trap.is_none(),
    }
}
