//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the following:
//! 1. **Operand Resolution:** Uses the forwarding unit to resolve data hazards.
//! 2. **Interrupt Sampling:** Takes a pending, enabled timer interrupt at this
//!    instruction boundary, squashing the instruction in Execute.
//! 3. **Arithmetic Execution:** ALU operations, effective addresses, store lanes,
//!    and the multi-cycle MDU handshake.
//! 4. **Control Resolution:** Evaluates branches and jumps, compares them with the
//!    fetch-time prediction and requests a redirect on mismatch.
//! 5. **System Execution:** CSR read-modify-write, ECALL, MRET and illegal opcodes.
//!
//! The stage is a pure function of the latches and the committed state; every
//! side effect is returned in [`ExecuteOutcome`] and applied on the clock edge.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::Trap;
use crate::core::arch::csr::{self, CsrFile, CsrUpdate, TrapRecord};
use crate::core::arch::trap::TrapHandler;
use crate::core::pipeline::hazards::{forward_csr, forward_operand};
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry};
use crate::core::pipeline::signals::{CsrOp, OpASrc, OpBSrc, SystemOp};
use crate::core::units::alu::Alu;
use crate::core::units::bru::BranchUnit;
use crate::core::units::lsu::Lsu;
use crate::core::units::mdu::{Mdu, MduOp};
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::opcodes;

/// Bit mask to clear bit 0 of `JALR` targets.
const JALR_ALIGNMENT_MASK: u32 = !1;

/// What Execute asks of the MDU on the clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MduAction {
    /// No M-extension instruction in Execute.
    #[default]
    None,
    /// Latch a new operation.
    Start(MduOp, u32, u32),
    /// The operation is in flight.
    Wait,
    /// The result was consumed this cycle.
    Complete,
}

/// Resolved control transfer used to train the predictor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchResolution {
    /// PC of the branch or jump.
    pub pc: u32,
    /// Whether control flow left the fall-through path.
    pub taken: bool,
    /// Resolved target.
    pub target: u32,
    /// The fetch-time prediction disagreed with the outcome.
    pub mispredicted: bool,
}

/// Everything Execute produces in one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOutcome {
    /// The EX/MEM entry for the next edge.
    pub entry: ExMemEntry,
    /// New fetch PC; younger instructions are flushed.
    pub redirect: Option<u32>,
    /// MDU request.
    pub mdu: MduAction,
    /// Branch or jump outcome for predictor training.
    pub branch: Option<BranchResolution>,
}

impl ExecuteOutcome {
    /// `true` while the MDU holds the Execute stage.
    pub const fn mdu_stall(&self) -> bool {
        matches!(self.mdu, MduAction::Start(..) | MduAction::Wait)
    }
}

/// Read-only view of the state Execute depends on.
#[derive(Clone, Copy, Debug)]
pub struct ExecuteInputs<'a> {
    /// The ID/EX latch.
    pub id_ex: &'a IdExEntry,
    /// The EX/MEM latch (forwarding source).
    pub ex_mem: &'a ExMemEntry,
    /// The MEM/WB latch (forwarding source).
    pub mem_wb: &'a MemWbEntry,
    /// Committed CSR state.
    pub csrs: &'a CsrFile,
    /// Live timer interrupt request.
    pub timer_irq: bool,
    /// The multiply/divide unit.
    pub mdu: &'a Mdu,
    /// An MDU operation for the instruction in Execute was already started.
    pub mdu_started: bool,
}

impl ExecuteInputs<'_> {
    fn csr(&self, addr: u32) -> u32 {
        forward_csr(
            addr,
            self.csrs.read(addr, self.timer_irq),
            self.ex_mem,
            self.mem_wb,
        )
    }

    fn trap_vector(&self) -> u32 {
        self.csr(csr::MTVEC) & csr::MTVEC_BASE_MASK
    }
}

/// Builds the EX/MEM entry and redirect for a trap taken by the instruction at `pc`.
fn take_trap(inputs: &ExecuteInputs<'_>, trap: Trap) -> ExecuteOutcome {
    let id = inputs.id_ex;
    let target = inputs.trap_vector();
    tracing::debug!(
        pc = format_args!("{:#010x}", id.pc),
        %trap,
        vector = format_args!("{target:#010x}"),
        "trap"
    );
    ExecuteOutcome {
        entry: ExMemEntry {
            valid: true,
            pc: id.pc,
            inst: id.decoded.raw,
            rd: 0,
            csr: CsrUpdate {
                exception: Some(TrapRecord {
                    pc: id.pc,
                    cause: trap.cause(),
                }),
                ..CsrUpdate::NONE
            },
            trap: Some(trap),
            ..ExMemEntry::default()
        },
        redirect: Some(target),
        ..ExecuteOutcome::default()
    }
}

/// Executes the instruction in the ID/EX latch.
pub fn execute_stage(inputs: &ExecuteInputs<'_>) -> ExecuteOutcome {
    let id = inputs.id_ex;
    if !id.valid {
        return ExecuteOutcome::default();
    }

    if !inputs.mdu_started {
        let pending = TrapHandler::pending_interrupt(
            inputs.csr(csr::MSTATUS),
            inputs.csr(csr::MIE),
            inputs.csr(csr::MIP),
        );
        if let Some(irq) = pending {
            return take_trap(inputs, irq);
        }
    }

    if id.ctrl.illegal {
        return take_trap(inputs, Trap::IllegalInstruction(id.decoded.raw));
    }

    let d = &id.decoded;
    let a = forward_operand(d.rs1, id.rv1, inputs.ex_mem, inputs.mem_wb);
    let b = forward_operand(d.rs2, id.rv2, inputs.ex_mem, inputs.mem_wb);
    let fall_through = id.pc.wrapping_add(INSTRUCTION_SIZE);

    let mut out = ExecuteOutcome {
        entry: ExMemEntry {
            valid: true,
            pc: id.pc,
            inst: d.raw,
            rd: d.rd,
            ctrl: id.ctrl,
            ..ExMemEntry::default()
        },
        ..ExecuteOutcome::default()
    };
    let mut next_pc = fall_through;

    match id.system {
        SystemOp::Ecall => return take_trap(inputs, Trap::EnvironmentCallFromMMode),
        SystemOp::Mret => {
            let target = inputs.csr(csr::MEPC);
            out.entry.csr = CsrUpdate {
                mret: true,
                ..CsrUpdate::NONE
            };
            out.redirect = Some(target);
            return out;
        }
        SystemOp::Ebreak | SystemOp::Wfi | SystemOp::None => {}
    }

    if let Some(op) = id.mdu_op {
        if !inputs.mdu_started {
            out.mdu = MduAction::Start(op, a, b);
            out.entry = ExMemEntry::default();
            return out;
        }
        if !inputs.mdu.ready() {
            out.mdu = MduAction::Wait;
            out.entry = ExMemEntry::default();
            return out;
        }
        out.mdu = MduAction::Complete;
        out.entry.result = inputs.mdu.result();
    } else if id.ctrl.csr_op != CsrOp::None {
        let addr = d.raw.csr();
        let old = inputs.csr(addr);
        let src = if id.ctrl.csr_op.uses_immediate() {
            d.rs1 as u32
        } else {
            a
        };
        if id.ctrl.csr_write {
            out.entry.csr.write = Some((addr, id.ctrl.csr_op.apply(old, src)));
        }
        out.entry.result = old;
    } else if id.ctrl.branch {
        let taken = BranchUnit::evaluate(d.funct3, a, b);
        let target = id.pc.wrapping_add(d.imm as u32);
        if taken {
            next_pc = target;
        }
        out.branch = Some(BranchResolution {
            pc: id.pc,
            taken,
            target,
            mispredicted: false,
        });
    } else if id.ctrl.jump {
        let target = if d.opcode == opcodes::OP_JALR {
            a.wrapping_add(d.imm as u32) & JALR_ALIGNMENT_MASK
        } else {
            id.pc.wrapping_add(d.imm as u32)
        };
        next_pc = target;
        out.entry.result = fall_through;
        out.branch = Some(BranchResolution {
            pc: id.pc,
            taken: true,
            target,
            mispredicted: false,
        });
    } else {
        let op_a = match id.ctrl.a_src() {
            OpASrc::Reg1 => a,
            OpASrc::Pc => id.pc,
        };
        let op_b = match id.ctrl.b_src() {
            OpBSrc::Reg2 => b,
            OpBSrc::Imm => d.imm as u32,
        };
        out.entry.result = Alu::execute(id.alu_op, op_a, op_b);
        if id.ctrl.mem_write {
            out.entry.store = Lsu::store_lanes(out.entry.result, d.funct3, b);
        }
    }

    if id.pred.next_pc(id.pc) != next_pc {
        out.redirect = Some(next_pc);
        if let Some(br) = out.branch.as_mut() {
            br.mispredicted = true;
        }
    }
    out
}
