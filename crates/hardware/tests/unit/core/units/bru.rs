//! Branch resolution and prediction.

use rstest::rstest;
use rvpipe_core::core::units::bru::bimodal::{BimodalPredictor, STRONGLY_TAKEN, WEAKLY_NOT_TAKEN};
use rvpipe_core::core::units::bru::btb::Btb;
use rvpipe_core::core::units::bru::static_bp::StaticPredictor;
use rvpipe_core::core::units::bru::{BranchPredictor, BranchUnit, Prediction};
use rvpipe_core::isa::rv32i::funct3;

#[rstest]
#[case(funct3::BEQ, 5, 5, true)]
#[case(funct3::BEQ, 5, 6, false)]
#[case(funct3::BNE, 5, 6, true)]
#[case(funct3::BLT, 0xFFFF_FFFF, 0, true)]
#[case(funct3::BGE, 0xFFFF_FFFF, 0, false)]
#[case(funct3::BGE, 3, 3, true)]
#[case(funct3::BLTU, 0xFFFF_FFFF, 0, false)]
#[case(funct3::BGEU, 0xFFFF_FFFF, 0, true)]
fn branch_conditions(#[case] f3: u32, #[case] a: u32, #[case] b: u32, #[case] taken: bool) {
    assert_eq!(BranchUnit::evaluate(f3, a, b), taken);
}

#[test]
fn counters_reset_weakly_not_taken() {
    let bp = BimodalPredictor::new(64);
    assert_eq!(bp.counter(0x40), WEAKLY_NOT_TAKEN);
    assert_eq!(bp.predict(0x40), Prediction::NOT_TAKEN);
}

#[test]
fn taken_training_saturates() {
    let mut bp = BimodalPredictor::new(64);
    bp.update(0x40, true, 0x100);
    bp.update(0x40, true, 0x100);
    bp.update(0x40, true, 0x100);
    assert_eq!(bp.counter(0x40), STRONGLY_TAKEN);
    assert_eq!(
        bp.predict(0x40),
        Prediction {
            taken: true,
            target: 0x100
        }
    );
}

#[test]
fn strong_counter_needs_two_not_taken_to_flip() {
    let mut bp = BimodalPredictor::new(64);
    bp.update(0x40, true, 0x100);
    bp.update(0x40, true, 0x100);
    bp.update(0x40, false, 0);
    assert!(bp.predict(0x40).taken);
    bp.update(0x40, false, 0);
    assert!(!bp.predict(0x40).taken);
}

#[test]
fn not_taken_saturates_at_zero() {
    let mut bp = BimodalPredictor::new(64);
    for _ in 0..4 {
        bp.update(0x8, false, 0);
    }
    assert_eq!(bp.counter(0x8), 0);
    bp.update(0x8, true, 0x20);
    assert!(!bp.predict(0x8).taken);
}

#[test]
fn table_is_indexed_by_word_pc_without_tags() {
    let mut bp = BimodalPredictor::new(64);
    bp.update(0x04, true, 0x80);
    bp.update(0x04, true, 0x80);
    // 0x104 shares pc[7:2] with 0x04.
    assert_eq!(
        bp.predict(0x104),
        Prediction {
            taken: true,
            target: 0x80
        }
    );
    assert!(!bp.predict(0x08).taken);
}

#[test]
fn btb_lookup_and_replace() {
    let mut btb = Btb::new(16);
    assert_eq!(btb.index(0x3C), 15);
    assert_eq!(btb.lookup(0x3C), None);
    btb.update(0x3C, 0x200);
    assert_eq!(btb.lookup(0x3C), Some(0x200));
    btb.update(0x7C, 0x300);
    assert_eq!(btb.lookup(0x3C), Some(0x300));
}

#[test]
fn static_predictor_always_falls_through() {
    let mut bp = StaticPredictor;
    bp.update(0x10, true, 0x40);
    let pred = bp.predict(0x10);
    assert!(!pred.taken);
    assert_eq!(pred.next_pc(0x10), 0x14);
}
