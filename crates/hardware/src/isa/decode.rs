//! RISC-V Instruction Decoder and Immediate Generator.
//!
//! This module splits a 32-bit instruction into its fields and produces the
//! sign-extended immediate for each format. It provides:
//! 1. **Immediate generation:** `imm_i`, `imm_s`, `imm_b`, `imm_u`, `imm_j`, and
//!    the format-dispatching `immediate`.
//! 2. **Format selection:** `format_of` maps a major opcode to its format.
//! 3. **Decoding:** `decode` builds a [`Decoded`] record for the Decode stage.

use crate::isa::instruction::{Decoded, ImmFormat, InstructionBits};
use crate::isa::privileged::opcodes::OP_SYSTEM;
use crate::isa::rv32i::opcodes;

/// Sign-extends the low `bits` bits of `value` to 32 bits.
#[inline(always)]
const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

/// I-type immediate: `inst[31:20]`, sign-extended.
#[inline(always)]
pub const fn imm_i(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// S-type immediate: `inst[31:25] | inst[11:7]`, sign-extended.
#[inline(always)]
pub const fn imm_s(inst: u32) -> i32 {
    let value = ((inst >> 25) << 5) | ((inst >> 7) & 0x1F);
    sign_extend(value, 12)
}

/// B-type immediate: a signed, even offset in the range -4096..=4094.
///
/// Layout: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
#[inline(always)]
pub const fn imm_b(inst: u32) -> i32 {
    let value = (((inst >> 31) & 1) << 12)
        | (((inst >> 7) & 1) << 11)
        | (((inst >> 25) & 0x3F) << 5)
        | (((inst >> 8) & 0xF) << 1);
    sign_extend(value, 13)
}

/// U-type immediate: `inst[31:12] << 12`.
#[inline(always)]
pub const fn imm_u(inst: u32) -> i32 {
    (inst & 0xFFFF_F000) as i32
}

/// J-type immediate: a signed, even offset in the range -1048576..=1048574.
///
/// Layout: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
#[inline(always)]
pub const fn imm_j(inst: u32) -> i32 {
    let value = (((inst >> 31) & 1) << 20)
        | (((inst >> 12) & 0xFF) << 12)
        | (((inst >> 20) & 1) << 11)
        | (((inst >> 21) & 0x3FF) << 1);
    sign_extend(value, 21)
}

/// Extracts the immediate of `inst` according to `format`.
///
/// R-type instructions carry no immediate and yield 0.
pub const fn immediate(inst: u32, format: ImmFormat) -> i32 {
    match format {
        ImmFormat::R => 0,
        ImmFormat::I => imm_i(inst),
        ImmFormat::S => imm_s(inst),
        ImmFormat::B => imm_b(inst),
        ImmFormat::U => imm_u(inst),
        ImmFormat::J => imm_j(inst),
    }
}

/// Returns the immediate format used by a major opcode.
///
/// Unknown opcodes are treated as R-type; the control unit flags them illegal.
pub const fn format_of(opcode: u32) -> ImmFormat {
    match opcode {
        opcodes::OP_LOAD | opcodes::OP_IMM | opcodes::OP_JALR | OP_SYSTEM => ImmFormat::I,
        opcodes::OP_STORE => ImmFormat::S,
        opcodes::OP_BRANCH => ImmFormat::B,
        opcodes::OP_LUI | opcodes::OP_AUIPC => ImmFormat::U,
        opcodes::OP_JAL => ImmFormat::J,
        _ => ImmFormat::R,
    }
}

/// Decodes a RISC-V instruction into its component fields.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode
///
/// # Returns
///
/// A [`Decoded`] record with every field extracted and the immediate
/// sign-extended for the format implied by the opcode.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();
    let format = format_of(opcode);
    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        format,
        imm: immediate(inst, format),
    }
}
