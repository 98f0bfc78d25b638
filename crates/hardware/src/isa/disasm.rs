//! Instruction Disassembler for RV32IM.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for the commit log, trace events, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use rvpipe_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00A0_0513), "addi a0, zero, 10");
//! ```

use crate::core::arch::csr;
use crate::isa::abi::name as xreg;
use crate::isa::decode::{imm_b, imm_i, imm_j, imm_s, imm_u};
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes as i_op};
use crate::isa::rv32m::{self, funct3 as m_f3};

/// Disassembles a 32-bit RISC-V instruction into a human-readable string.
///
/// Returns a mnemonic like `"add a0, a1, a2"` or `"unknown"` for
/// unrecognised encodings.
pub fn disassemble(inst: u32) -> String {
    let rd = inst.rd();
    let rs1 = inst.rs1();
    let rs2 = inst.rs2();
    let f3 = inst.funct3();

    match inst.opcode() {
        // ── R-type register-register ──────────────────────
        i_op::OP_REG => disasm_op_reg(rd, rs1, rs2, f3, inst.funct7()),

        // ── I-type immediate arithmetic ───────────────────
        i_op::OP_IMM => disasm_op_imm(rd, rs1, f3, inst),

        i_op::OP_LOAD => {
            let mn = match f3 {
                i_f3::LB => "lb",
                i_f3::LH => "lh",
                i_f3::LW => "lw",
                i_f3::LBU => "lbu",
                i_f3::LHU => "lhu",
                _ => return unknown(inst),
            };
            format!("{mn} {}, {}({})", xreg(rd), imm_i(inst), xreg(rs1))
        }

        i_op::OP_STORE => {
            let mn = match f3 {
                i_f3::SB => "sb",
                i_f3::SH => "sh",
                i_f3::SW => "sw",
                _ => return unknown(inst),
            };
            format!("{mn} {}, {}({})", xreg(rs2), imm_s(inst), xreg(rs1))
        }

        i_op::OP_BRANCH => {
            let mn = match f3 {
                i_f3::BEQ => "beq",
                i_f3::BNE => "bne",
                i_f3::BLT => "blt",
                i_f3::BGE => "bge",
                i_f3::BLTU => "bltu",
                i_f3::BGEU => "bgeu",
                _ => return unknown(inst),
            };
            format!("{mn} {}, {}, {}", xreg(rs1), xreg(rs2), imm_b(inst))
        }

        i_op::OP_LUI => format!("lui {}, {:#x}", xreg(rd), (imm_u(inst) as u32) >> 12),
        i_op::OP_AUIPC => format!("auipc {}, {:#x}", xreg(rd), (imm_u(inst) as u32) >> 12),
        i_op::OP_JAL => format!("jal {}, {}", xreg(rd), imm_j(inst)),
        i_op::OP_JALR => format!("jalr {}, {}({})", xreg(rd), imm_i(inst), xreg(rs1)),
        i_op::OP_MISC_MEM => "fence".to_string(),

        sys_op::OP_SYSTEM => disasm_system(inst, rd, rs1, f3),

        _ => unknown(inst),
    }
}

fn unknown(inst: u32) -> String {
    format!("unknown ({inst:#010x})")
}

fn disasm_op_reg(rd: usize, rs1: usize, rs2: usize, f3: u32, f7: u32) -> String {
    let mn = if f7 == rv32m::MULDIV {
        match f3 {
            m_f3::MUL => "mul",
            m_f3::MULH => "mulh",
            m_f3::MULHSU => "mulhsu",
            m_f3::MULHU => "mulhu",
            m_f3::DIV => "div",
            m_f3::DIVU => "divu",
            m_f3::REM => "rem",
            _ => "remu",
        }
    } else {
        let alt = f7 == i_f7::ALT;
        match (f3, alt) {
            (i_f3::ADD_SUB, false) => "add",
            (i_f3::ADD_SUB, true) => "sub",
            (i_f3::SLL, _) => "sll",
            (i_f3::SLT, _) => "slt",
            (i_f3::SLTU, _) => "sltu",
            (i_f3::XOR, _) => "xor",
            (i_f3::SRL_SRA, false) => "srl",
            (i_f3::SRL_SRA, true) => "sra",
            (i_f3::OR, _) => "or",
            _ => "and",
        }
    };
    format!("{mn} {}, {}, {}", xreg(rd), xreg(rs1), xreg(rs2))
}

fn disasm_op_imm(rd: usize, rs1: usize, f3: u32, inst: u32) -> String {
    let imm = imm_i(inst);
    let shamt = inst.rs2();
    match f3 {
        i_f3::ADD_SUB => format!("addi {}, {}, {imm}", xreg(rd), xreg(rs1)),
        i_f3::SLT => format!("slti {}, {}, {imm}", xreg(rd), xreg(rs1)),
        i_f3::SLTU => format!("sltiu {}, {}, {imm}", xreg(rd), xreg(rs1)),
        i_f3::XOR => format!("xori {}, {}, {imm}", xreg(rd), xreg(rs1)),
        i_f3::OR => format!("ori {}, {}, {imm}", xreg(rd), xreg(rs1)),
        i_f3::AND => format!("andi {}, {}, {imm}", xreg(rd), xreg(rs1)),
        i_f3::SLL => format!("slli {}, {}, {shamt}", xreg(rd), xreg(rs1)),
        _ if inst.funct7() & i_f7::ALT != 0 => {
            format!("srai {}, {}, {shamt}", xreg(rd), xreg(rs1))
        }
        _ => format!("srli {}, {}, {shamt}", xreg(rd), xreg(rs1)),
    }
}

fn disasm_system(inst: u32, rd: usize, rs1: usize, f3: u32) -> String {
    let csr_name = csr::name(inst.csr());
    match f3 {
        sys_op::PRIV => match inst {
            sys_op::ECALL => "ecall".to_string(),
            sys_op::EBREAK => "ebreak".to_string(),
            sys_op::MRET => "mret".to_string(),
            sys_op::WFI => "wfi".to_string(),
            _ => unknown(inst),
        },
        sys_op::CSRRW => format!("csrrw {}, {csr_name}, {}", xreg(rd), xreg(rs1)),
        sys_op::CSRRS => format!("csrrs {}, {csr_name}, {}", xreg(rd), xreg(rs1)),
        sys_op::CSRRC => format!("csrrc {}, {csr_name}, {}", xreg(rd), xreg(rs1)),
        sys_op::CSRRWI => format!("csrrwi {}, {csr_name}, {rs1}", xreg(rd)),
        sys_op::CSRRSI => format!("csrrsi {}, {csr_name}, {rs1}", xreg(rd)),
        sys_op::CSRRCI => format!("csrrci {}, {csr_name}, {rs1}", xreg(rd)),
        _ => unknown(inst),
    }
}
