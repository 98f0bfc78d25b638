//! Immediate generation, checked against the test encoder.

use proptest::prelude::*;
use rvpipe_core::isa::decode::{imm_b, imm_i, imm_j, imm_s, imm_u};

use crate::common::InstructionBuilder;

#[test]
fn extremes() {
    assert_eq!(imm_i(InstructionBuilder::new().addi(1, 0, -2048).build()), -2048);
    assert_eq!(imm_i(InstructionBuilder::new().addi(1, 0, 2047).build()), 2047);
    assert_eq!(imm_s(InstructionBuilder::new().sw(1, 2, -1).build()), -1);
    assert_eq!(imm_b(InstructionBuilder::new().beq(1, 2, -4096).build()), -4096);
    assert_eq!(imm_j(InstructionBuilder::new().jal(1, 0xF_FFFE).build()), 0xF_FFFE);
    assert_eq!(
        imm_u(InstructionBuilder::new().lui(1, 0xFFFFF).build()),
        0xFFFF_F000_u32 as i32
    );
}

#[test]
fn canonical_encodings() {
    assert_eq!(imm_i(0x00a0_0093), 10);
    assert_eq!(imm_b(0x0020_8463), 8);
    assert_eq!(imm_j(0x0080_02ef), 8);
    assert_eq!(imm_s(0x0032_a023), 0);
}

proptest! {
    #[test]
    fn i_type_round_trip(imm in -2048i32..2048) {
        let inst = InstructionBuilder::new().addi(5, 6, imm).build();
        prop_assert_eq!(imm_i(inst), imm);
    }

    #[test]
    fn s_type_round_trip(imm in -2048i32..2048) {
        let inst = InstructionBuilder::new().sw(5, 6, imm).build();
        prop_assert_eq!(imm_s(inst), imm);
    }

    #[test]
    fn b_type_round_trip(half in -2048i32..2048) {
        let inst = InstructionBuilder::new().bne(5, 6, half * 2).build();
        prop_assert_eq!(imm_b(inst), half * 2);
    }

    #[test]
    fn j_type_round_trip(half in -(1i32 << 19)..(1i32 << 19)) {
        let inst = InstructionBuilder::new().jal(1, half * 2).build();
        prop_assert_eq!(imm_j(inst), half * 2);
    }

    #[test]
    fn u_type_low_bits_are_zero(upper in 0u32..(1 << 20)) {
        let inst = InstructionBuilder::new().auipc(3, upper).build();
        prop_assert_eq!(imm_u(inst) as u32, upper << 12);
    }
}
