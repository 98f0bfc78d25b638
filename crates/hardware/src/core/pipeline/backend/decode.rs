//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Field Extraction:** Splits the encoding and generates the immediate.
//! 2. **Control Generation:** Runs the Control Unit and the ALU Control Unit.
//! 3. **Classification:** Identifies M-extension and privileged system instructions.
//! 4. **Register Read:** Reads both source registers, bypassing a same-cycle Writeback.

use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::control::{alu_control, control_unit};
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::{ControlSignals, SystemOp};
use crate::core::units::mdu::MduOp;
use crate::isa::decode::decode;
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::opcodes;
use crate::isa::rv32m;

/// A register write presented by Writeback this cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegWrite {
    /// Destination register (never 0).
    pub rd: usize,
    /// Value written.
    pub value: u32,
}

/// Reads `idx` from the register file, bypassing a same-cycle write.
pub fn read_register(regs: &Gpr, wb: Option<RegWrite>, idx: usize) -> u32 {
    match wb {
        Some(w) if idx != 0 && w.rd == idx => w.value,
        _ => regs.read(idx),
    }
}

/// Classifies a `funct3 == 0` SYSTEM encoding by its full raw value.
pub const fn classify_system(raw: u32) -> Option<SystemOp> {
    match raw {
        sys_op::ECALL => Some(SystemOp::Ecall),
        sys_op::EBREAK => Some(SystemOp::Ebreak),
        sys_op::MRET => Some(SystemOp::Mret),
        sys_op::WFI => Some(SystemOp::Wfi),
        _ => None,
    }
}

/// Executes the decode stage.
///
/// # Arguments
///
/// * `if_id` - The IF/ID latch.
/// * `regs` - Architectural register file.
/// * `wb` - The register write Writeback performs on this edge, if any.
///
/// # Returns
///
/// The ID/EX entry for the next edge; a bubble when IF/ID is empty.
pub fn decode_stage(if_id: &IfIdEntry, regs: &Gpr, wb: Option<RegWrite>) -> IdExEntry {
    if !if_id.valid {
        return IdExEntry::default();
    }

    let d = decode(if_id.inst);
    let mut ctrl = control_unit(d.opcode, d.funct3, d.rs1);
    let alu_op = alu_control(ctrl.alu_op, d.funct3, d.funct7);

    let mdu_op = (d.opcode == opcodes::OP_REG && d.funct7 == rv32m::MULDIV)
        .then(|| MduOp::from_funct3(d.funct3));

    let mut system = SystemOp::None;
    if ctrl.system {
        match classify_system(d.raw) {
            Some(op) => system = op,
            None => ctrl.illegal = true,
        }
    }
    if ctrl.illegal {
        ctrl = ControlSignals {
            illegal: true,
            ..Default::default()
        };
    }

    IdExEntry {
        valid: true,
        pc: if_id.pc,
        decoded: d,
        rv1: read_register(regs, wb, d.rs1),
        rv2: read_register(regs, wb, d.rs2),
        ctrl,
        alu_op,
        mdu_op,
        system,
        pred: if_id.pred,
    }
}
