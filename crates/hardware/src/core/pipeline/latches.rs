//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the four pipeline registers of the five-stage pipeline:
//! Fetch → IF/ID → Decode → ID/EX → Execute → EX/MEM → Memory → MEM/WB → Writeback.
//!
//! 1. **Instruction Flow:** Each latch holds at most one instruction. A bubble is
//!    the `Default` value: `valid` clear and every control enable clear, so it can
//!    never mutate architectural state.
//! 2. **Trap Propagation:** Trap entry and MRET travel as a [`CsrUpdate`] and are
//!    committed at Writeback in program order.

use crate::common::error::Trap;
use crate::core::arch::csr::CsrUpdate;
use crate::core::pipeline::signals::{AluOp, ControlSignals, SystemOp};
use crate::core::units::bru::Prediction;
use crate::core::units::lsu::StoreLanes;
use crate::core::units::mdu::MduOp;
use crate::isa::instruction::Decoded;

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Holds a fetched instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Fetch-time prediction for this PC.
    pub pred: Prediction,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// Holds a decoded instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded fields and immediate.
    pub decoded: Decoded,
    /// Value read from rs1 in Decode.
    pub rv1: u32,
    /// Value read from rs2 in Decode.
    pub rv2: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Concrete ALU operation from the ALU Control Unit.
    pub alu_op: AluOp,
    /// Multiply/divide operation, if this is an M-extension instruction.
    pub mdu_op: Option<MduOp>,
    /// Privileged system instruction kind.
    pub system: SystemOp,
    /// Fetch-time prediction for this PC.
    pub pred: Prediction,
}

impl IdExEntry {
    /// Destination register index.
    pub const fn rd(&self) -> usize {
        self.decoded.rd
    }
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Holds an executed instruction (or a trap record).
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// Register result, or the effective address for loads and stores.
    pub result: u32,
    /// Store lanes (stores only).
    pub store: StoreLanes,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// CSR effect committed at Writeback.
    pub csr: CsrUpdate,
    /// Trap raised by this instruction, if any.
    pub trap: Option<Trap>,
}

impl ExMemEntry {
    /// `true` if this entry will write a non-zero destination register.
    pub const fn writes_rd(&self) -> bool {
        self.valid && self.ctrl.reg_write && self.rd != 0
    }

    /// `true` if this entry occupies the data bus.
    pub const fn is_mem_op(&self) -> bool {
        self.valid && (self.ctrl.mem_read || self.ctrl.mem_write)
    }
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Holds a completed instruction.
    pub valid: bool,
    /// Already committed while the pipeline was frozen; Writeback skips it.
    pub retired: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// Register result (non-loads).
    pub result: u32,
    /// Extended load data (loads).
    pub load_data: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
    /// CSR effect committed at Writeback.
    pub csr: CsrUpdate,
    /// Trap raised by this instruction, if any.
    pub trap: Option<Trap>,
}

impl MemWbEntry {
    /// `true` if this entry will (or did) write a non-zero destination register.
    pub const fn writes_rd(&self) -> bool {
        self.valid && self.ctrl.reg_write && self.rd != 0
    }

    /// The value written to `rd`.
    pub const fn wb_value(&self) -> u32 {
        if self.ctrl.mem_to_reg {
            self.load_data
        } else {
            self.result
        }
    }

    /// CSR effect still to be committed; empty once retired.
    pub const fn pending_csr(&self) -> CsrUpdate {
        if self.valid && !self.retired {
            self.csr
        } else {
            CsrUpdate::NONE
        }
    }
}
