//! Fluent RV32IM instruction encoder.
//!
//! ```ignore
//! let inst = InstructionBuilder::new().addi(1, 0, 10).build();
//! assert_eq!(inst, 0x00a0_0093);
//! ```

use rvpipe_core::isa::privileged::opcodes::{
    CSRRC, CSRRCI, CSRRS, CSRRSI, CSRRW, CSRRWI, EBREAK, ECALL, MRET, OP_SYSTEM,
};
use rvpipe_core::isa::rv32i::funct3;
use rvpipe_core::isa::rv32i::funct7;
use rvpipe_core::isa::rv32i::opcodes::*;
use rvpipe_core::isa::rv32m::{self, funct3 as m_funct3};

/// Encoding format, derived from the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    R,
    I,
    S,
    B,
    U,
    J,
}

fn format_of(opcode: u32) -> Format {
    match opcode {
        OP_REG => Format::R,
        OP_STORE => Format::S,
        OP_BRANCH => Format::B,
        OP_LUI | OP_AUIPC => Format::U,
        OP_JAL => Format::J,
        _ => Format::I,
    }
}

/// Builder for a single 32-bit instruction word.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstructionBuilder {
    opcode: u32,
    rd: u32,
    funct3: u32,
    rs1: u32,
    rs2: u32,
    funct7: u32,
    imm: i32,
    raw: Option<u32>,
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opcode(mut self, op: u32) -> Self {
        self.opcode = op;
        self
    }

    pub fn rd(mut self, rd: u32) -> Self {
        self.rd = rd;
        self
    }

    pub fn rs1(mut self, rs1: u32) -> Self {
        self.rs1 = rs1;
        self
    }

    pub fn rs2(mut self, rs2: u32) -> Self {
        self.rs2 = rs2;
        self
    }

    pub fn funct3(mut self, funct3: u32) -> Self {
        self.funct3 = funct3;
        self
    }

    pub fn funct7(mut self, funct7: u32) -> Self {
        self.funct7 = funct7;
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    // --- Generic shapes ---

    fn r(mut self, f3: u32, f7: u32, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.opcode = OP_REG;
        self.funct3 = f3;
        self.funct7 = f7;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self
    }

    fn i(mut self, opcode: u32, f3: u32, rd: u32, rs1: u32, imm: i32) -> Self {
        self.opcode = opcode;
        self.funct3 = f3;
        self.rd = rd;
        self.rs1 = rs1;
        self.imm = imm;
        self
    }

    fn s(mut self, f3: u32, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.opcode = OP_STORE;
        self.funct3 = f3;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.imm = imm;
        self
    }

    fn b(mut self, f3: u32, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.opcode = OP_BRANCH;
        self.funct3 = f3;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.imm = imm;
        self
    }

    // --- Helpers for Common Instructions ---

    pub fn add(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::ADD_SUB, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sub(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::ADD_SUB, funct7::ALT, rd, rs1, rs2)
    }

    pub fn and(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::AND, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn or(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::OR, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn xor(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::XOR, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sll(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::SLL, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn srl(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::SRL_SRA, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sra(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::SRL_SRA, funct7::ALT, rd, rs1, rs2)
    }

    pub fn slt(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::SLT, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn sltu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(funct3::SLTU, funct7::DEFAULT, rd, rs1, rs2)
    }

    pub fn mul(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(m_funct3::MUL, rv32m::MULDIV, rd, rs1, rs2)
    }

    pub fn mulh(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(m_funct3::MULH, rv32m::MULDIV, rd, rs1, rs2)
    }

    pub fn mulhu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(m_funct3::MULHU, rv32m::MULDIV, rd, rs1, rs2)
    }

    pub fn div(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(m_funct3::DIV, rv32m::MULDIV, rd, rs1, rs2)
    }

    pub fn divu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(m_funct3::DIVU, rv32m::MULDIV, rd, rs1, rs2)
    }

    pub fn rem(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(m_funct3::REM, rv32m::MULDIV, rd, rs1, rs2)
    }

    pub fn remu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r(m_funct3::REMU, rv32m::MULDIV, rd, rs1, rs2)
    }

    pub fn addi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, funct3::ADD_SUB, rd, rs1, imm)
    }

    pub fn andi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, funct3::AND, rd, rs1, imm)
    }

    pub fn ori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, funct3::OR, rd, rs1, imm)
    }

    pub fn xori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, funct3::XOR, rd, rs1, imm)
    }

    pub fn slti(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, funct3::SLT, rd, rs1, imm)
    }

    pub fn sltiu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_IMM, funct3::SLTU, rd, rs1, imm)
    }

    pub fn slli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i(OP_IMM, funct3::SLL, rd, rs1, (shamt & 0x1f) as i32)
    }

    pub fn srli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i(OP_IMM, funct3::SRL_SRA, rd, rs1, (shamt & 0x1f) as i32)
    }

    pub fn srai(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        let imm = (funct7::ALT << 5) | (shamt & 0x1f);
        self.i(OP_IMM, funct3::SRL_SRA, rd, rs1, imm as i32)
    }

    pub fn lw(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, funct3::LW, rd, rs1, imm)
    }

    pub fn lh(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, funct3::LH, rd, rs1, imm)
    }

    pub fn lhu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, funct3::LHU, rd, rs1, imm)
    }

    pub fn lb(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, funct3::LB, rd, rs1, imm)
    }

    pub fn lbu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_LOAD, funct3::LBU, rd, rs1, imm)
    }

    pub fn sw(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s(funct3::SW, rs1, rs2, imm)
    }

    pub fn sh(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s(funct3::SH, rs1, rs2, imm)
    }

    pub fn sb(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s(funct3::SB, rs1, rs2, imm)
    }

    pub fn beq(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(funct3::BEQ, rs1, rs2, imm)
    }

    pub fn bne(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(funct3::BNE, rs1, rs2, imm)
    }

    pub fn blt(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(funct3::BLT, rs1, rs2, imm)
    }

    pub fn bge(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(funct3::BGE, rs1, rs2, imm)
    }

    pub fn bltu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(funct3::BLTU, rs1, rs2, imm)
    }

    pub fn bgeu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b(funct3::BGEU, rs1, rs2, imm)
    }

    pub fn jal(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_JAL;
        self.rd = rd;
        self.imm = imm;
        self
    }

    pub fn jalr(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i(OP_JALR, 0, rd, rs1, imm)
    }

    /// `LUI rd, imm20`: `rd = imm20 << 12`.
    pub fn lui(mut self, rd: u32, imm20: u32) -> Self {
        self.opcode = OP_LUI;
        self.rd = rd;
        self.imm = (imm20 << 12) as i32;
        self
    }

    /// `AUIPC rd, imm20`: `rd = pc + (imm20 << 12)`.
    pub fn auipc(mut self, rd: u32, imm20: u32) -> Self {
        self.opcode = OP_AUIPC;
        self.rd = rd;
        self.imm = (imm20 << 12) as i32;
        self
    }

    pub fn csrrw(self, rd: u32, csr: u32, rs1: u32) -> Self {
        self.i(OP_SYSTEM, CSRRW, rd, rs1, csr as i32)
    }

    pub fn csrrs(self, rd: u32, csr: u32, rs1: u32) -> Self {
        self.i(OP_SYSTEM, CSRRS, rd, rs1, csr as i32)
    }

    pub fn csrrc(self, rd: u32, csr: u32, rs1: u32) -> Self {
        self.i(OP_SYSTEM, CSRRC, rd, rs1, csr as i32)
    }

    pub fn csrrwi(self, rd: u32, csr: u32, uimm: u32) -> Self {
        self.i(OP_SYSTEM, CSRRWI, rd, uimm, csr as i32)
    }

    pub fn csrrsi(self, rd: u32, csr: u32, uimm: u32) -> Self {
        self.i(OP_SYSTEM, CSRRSI, rd, uimm, csr as i32)
    }

    pub fn csrrci(self, rd: u32, csr: u32, uimm: u32) -> Self {
        self.i(OP_SYSTEM, CSRRCI, rd, uimm, csr as i32)
    }

    pub fn ecall(mut self) -> Self {
        self.raw = Some(ECALL);
        self
    }

    pub fn ebreak(mut self) -> Self {
        self.raw = Some(EBREAK);
        self
    }

    pub fn mret(mut self) -> Self {
        self.raw = Some(MRET);
        self
    }

    pub fn nop(self) -> Self {
        self.addi(0, 0, 0)
    }

    /// Encodes the instruction.
    pub fn build(self) -> u32 {
        if let Some(raw) = self.raw {
            return raw;
        }
        let imm = self.imm as u32;
        let base = self.opcode & 0x7f;
        let rd = (self.rd & 0x1f) << 7;
        let f3 = (self.funct3 & 0x7) << 12;
        let rs1 = (self.rs1 & 0x1f) << 15;
        let rs2 = (self.rs2 & 0x1f) << 20;
        match format_of(self.opcode) {
            Format::R => ((self.funct7 & 0x7f) << 25) | rs2 | rs1 | f3 | rd | base,
            Format::I => ((imm & 0xfff) << 20) | rs1 | f3 | rd | base,
            Format::S => {
                (((imm >> 5) & 0x7f) << 25) | rs2 | rs1 | f3 | ((imm & 0x1f) << 7) | base
            }
            Format::B => {
                (((imm >> 12) & 1) << 31)
                    | (((imm >> 5) & 0x3f) << 25)
                    | rs2
                    | rs1
                    | f3
                    | (((imm >> 1) & 0xf) << 8)
                    | (((imm >> 11) & 1) << 7)
                    | base
            }
            Format::U => (imm & 0xffff_f000) | rd | base,
            Format::J => {
                (((imm >> 20) & 1) << 31)
                    | (((imm >> 1) & 0x3ff) << 21)
                    | (((imm >> 11) & 1) << 20)
                    | (((imm >> 12) & 0xff) << 12)
                    | rd
                    | base
            }
        }
    }
}
