//! Decoded instruction records.

use pretty_assertions::assert_eq;
use rvpipe_core::isa::decode::{decode, format_of};
use rvpipe_core::isa::instruction::{Decoded, ImmFormat, InstructionBits};
use rvpipe_core::isa::privileged::opcodes::OP_SYSTEM;
use rvpipe_core::isa::rv32i::opcodes;

use crate::common::InstructionBuilder;

#[test]
fn decodes_r_type_fields() {
    let inst = InstructionBuilder::new().sub(4, 1, 2).build();
    assert_eq!(
        decode(inst),
        Decoded {
            raw: inst,
            opcode: opcodes::OP_REG,
            rd: 4,
            rs1: 1,
            rs2: 2,
            funct3: 0,
            funct7: 0x20,
            format: ImmFormat::R,
            imm: 0,
        }
    );
}

#[test]
fn decodes_load_offset() {
    let d = decode(InstructionBuilder::new().lw(7, 6, -8).build());
    assert_eq!(d.opcode, opcodes::OP_LOAD);
    assert_eq!(d.rd, 7);
    assert_eq!(d.rs1, 6);
    assert_eq!(d.format, ImmFormat::I);
    assert_eq!(d.imm, -8);
}

#[test]
fn formats_by_opcode() {
    assert_eq!(format_of(opcodes::OP_IMM), ImmFormat::I);
    assert_eq!(format_of(opcodes::OP_JALR), ImmFormat::I);
    assert_eq!(format_of(OP_SYSTEM), ImmFormat::I);
    assert_eq!(format_of(opcodes::OP_STORE), ImmFormat::S);
    assert_eq!(format_of(opcodes::OP_BRANCH), ImmFormat::B);
    assert_eq!(format_of(opcodes::OP_AUIPC), ImmFormat::U);
    assert_eq!(format_of(opcodes::OP_JAL), ImmFormat::J);
    assert_eq!(format_of(opcodes::OP_REG), ImmFormat::R);
}

#[test]
fn csr_address_field() {
    let inst = InstructionBuilder::new().csrrs(3, 0x342, 0).build();
    assert_eq!(inst.csr(), 0x342);
    assert_eq!(inst.rd(), 3);
    assert_eq!(inst, 0x3420_21f3);
}
