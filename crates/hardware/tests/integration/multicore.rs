//! Multi-tile chips sharing the L2 and system bus.

use pretty_assertions::assert_eq;
use rvpipe_core::config::Config;
use rvpipe_core::core::arch::csr::MHARTID;

use crate::common::{InstructionBuilder as I, TestContext};

fn chip(harts: usize) -> TestContext {
    let config = Config::from_json(&format!(r#"{{ "system": {{ "harts": {harts} }} }}"#))
        .unwrap_or_else(|e| panic!("{e}"));
    TestContext::with_config(config)
}

/// Each hart counts to 20, storing every step to `0x1000 + 4 * hartid`.
fn counting_program() -> Vec<u32> {
    vec![
        I::new().csrrs(1, MHARTID, 0).build(),
        I::new().slli(2, 1, 2).build(),
        I::new().lui(3, 1).build(),
        I::new().add(3, 3, 2).build(),
        I::new().addi(5, 0, 0).build(),
        I::new().addi(6, 0, 20).build(),
        I::new().addi(5, 5, 1).build(),
        I::new().sw(3, 5, 0).build(),
        I::new().bne(5, 6, -8).build(),
        I::new().jal(0, 0).build(),
    ]
}

#[test]
fn tiles_report_their_hart_id() {
    let ctx = chip(3);
    assert_eq!(ctx.sim.chip.harts(), 3);
    for hart in 0..3 {
        let id = ctx.sim.csr(hart, MHARTID).unwrap();
        assert_eq!(id as usize, hart);
    }
}

#[test]
fn every_hart_makes_progress() {
    let mut ctx = chip(2).load_program(0, &counting_program());
    ctx.run(5_000);

    for hart in 0..2 {
        assert_eq!(ctx.get_hart_reg(hart, 1) as usize, hart);
        assert_eq!(ctx.get_hart_reg(hart, 5), 20);
    }
    assert_eq!(ctx.get_mem(0x1000), 20);
    assert_eq!(ctx.get_mem(0x1004), 20);
}

#[test]
fn stats_are_kept_per_hart() {
    let mut ctx = chip(2).load_program(0, &counting_program());
    ctx.run(5_000);
    let s0 = ctx.sim.stats(0).unwrap();
    let s1 = ctx.sim.stats(1).unwrap();
    assert!(s0.instructions_retired > 60);
    assert!(s1.instructions_retired > 60);
    assert!(ctx.sim.stats(2).is_err());
}
