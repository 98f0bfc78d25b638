//! Control Unit and ALU Control Unit.
//!
//! Both units are pure, table-driven functions evaluated in the Decode stage:
//! 1. **Control Unit:** `opcode` + `funct3` (+ `rs1` for CSR set/clear) to the
//!    [`ControlSignals`] vector, one row per supported opcode.
//! 2. **ALU Control Unit:** refines the coarse [`AluOpClass`] with `funct3` and
//!    `funct7` into the concrete [`AluOp`].

use crate::core::pipeline::signals::{AluOp, AluOpClass, ControlSignals, CsrOp};
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Maps an opcode to its control-signal vector.
///
/// # Arguments
///
/// * `opcode` - Major opcode (bits 6:0).
/// * `funct3` - Minor opcode; selects the CSR operation for SYSTEM.
/// * `rs1` - Source register index; a CSRRS/CSRRC with `rs1 == 0` (or a zero
///   immediate) reads without writing.
///
/// # Returns
///
/// The control signals. Unknown opcodes return a vector with only `illegal` set.
pub fn control_unit(opcode: u32, funct3: u32, rs1: usize) -> ControlSignals {
    let base = ControlSignals::default();
    match opcode {
        opcodes::OP_REG => ControlSignals {
            reg_write: true,
            alu_op: AluOpClass::RType,
            ..base
        },
        opcodes::OP_IMM => ControlSignals {
            reg_write: true,
            alu_src: true,
            alu_op: AluOpClass::IType,
            ..base
        },
        opcodes::OP_LOAD => ControlSignals {
            reg_write: true,
            alu_src: true,
            mem_read: true,
            mem_to_reg: true,
            ..base
        },
        opcodes::OP_STORE => ControlSignals {
            alu_src: true,
            mem_write: true,
            ..base
        },
        opcodes::OP_BRANCH => ControlSignals {
            branch: true,
            alu_op: AluOpClass::Branch,
            ..base
        },
        opcodes::OP_JAL => ControlSignals {
            reg_write: true,
            jump: true,
            ..base
        },
        opcodes::OP_JALR => ControlSignals {
            reg_write: true,
            alu_src: true,
            jump: true,
            ..base
        },
        opcodes::OP_LUI => ControlSignals {
            reg_write: true,
            alu_src: true,
            alu_op: AluOpClass::Lui,
            ..base
        },
        opcodes::OP_AUIPC => ControlSignals {
            reg_write: true,
            alu_src: true,
            alu_src_a: true,
            ..base
        },
        opcodes::OP_MISC_MEM => base,
        sys_op::OP_SYSTEM => system_row(funct3, rs1),
        _ => ControlSignals {
            illegal: true,
            ..base
        },
    }
}

fn system_row(funct3: u32, rs1: usize) -> ControlSignals {
    let base = ControlSignals::default();
    let csr_op = match funct3 {
        sys_op::PRIV => {
            return ControlSignals {
                system: true,
                ..base
            };
        }
        sys_op::CSRRW => CsrOp::Rw,
        sys_op::CSRRS => CsrOp::Rs,
        sys_op::CSRRC => CsrOp::Rc,
        sys_op::CSRRWI => CsrOp::Rwi,
        sys_op::CSRRSI => CsrOp::Rsi,
        sys_op::CSRRCI => CsrOp::Rci,
        _ => {
            return ControlSignals {
                illegal: true,
                ..base
            };
        }
    };
    let writes = matches!(csr_op, CsrOp::Rw | CsrOp::Rwi) || rs1 != 0;
    ControlSignals {
        reg_write: true,
        csr_write: writes,
        csr_to_reg: true,
        csr_op,
        ..base
    }
}

/// Selects the concrete ALU operation.
///
/// # Arguments
///
/// * `class` - Coarse class from the Control Unit.
/// * `funct3` - Instruction bits 14:12.
/// * `funct7` - Instruction bits 31:25; bit 5 distinguishes SUB/SRA. For
///   I-type only SRAI consults it, since ADDI has no subtract form.
pub const fn alu_control(class: AluOpClass, funct3: u32, funct7: u32) -> AluOp {
    let alt = funct7 & funct7::ALT != 0;
    match class {
        AluOpClass::Add => AluOp::Add,
        AluOpClass::Lui => AluOp::Lui,
        AluOpClass::Branch => match funct3 {
            funct3::BEQ | funct3::BNE => AluOp::Sub,
            funct3::BLT | funct3::BGE => AluOp::Slt,
            _ => AluOp::Sltu,
        },
        AluOpClass::RType | AluOpClass::IType => match funct3 {
            funct3::ADD_SUB => {
                if alt && matches!(class, AluOpClass::RType) {
                    AluOp::Sub
                } else {
                    AluOp::Add
                }
            }
            funct3::SLL => AluOp::Sll,
            funct3::SLT => AluOp::Slt,
            funct3::SLTU => AluOp::Sltu,
            funct3::XOR => AluOp::Xor,
            funct3::SRL_SRA => {
                if alt {
                    AluOp::Sra
                } else {
                    AluOp::Srl
                }
            }
            funct3::OR => AluOp::Or,
            _ => AluOp::And,
        },
    }
}
