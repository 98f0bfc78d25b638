//! Exceptions, MRET and the machine timer interrupt.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::common::constants::NOP;
use rvpipe_core::config::Config;
use rvpipe_core::core::arch::csr::{
    MCAUSE, MEPC, MIE, MIP, MIP_MTIP, MSTATUS, MSTATUS_MIE, MSTATUS_MPIE, MTVEC,
};
use rvpipe_core::isa::privileged::cause::{exception, interrupt};

use crate::common::{InstructionBuilder as I, TestContext};

#[test]
fn ecall_handler_returns_past_the_call() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            0x0200_0093,
            0x3050_9073,
            0x0000_0073,
            0x0aa0_0513,
            0x0010_0073,
            NOP,
            NOP,
            NOP,
            0x3410_22f3,
            0x0042_8293,
            0x3412_9073,
            0x3020_0073,
        ],
    );
    let _ = ctx.run_until_ebreak();
    assert_eq!(ctx.get_reg(10), 0xAA);
    assert_eq!(ctx.get_csr(MEPC), 0xC);
    assert_eq!(ctx.stats().traps_taken, 1);
}

#[test]
fn ecall_records_cause_and_pc() {
    let mut ctx = TestContext::new().load_sparse(
        16,
        &[
            (0x00, 0x0200_0093),
            (0x04, 0x3050_9073),
            (0x08, 0x0000_0073),
            (0x20, 0x3420_2173),
            (0x24, 0x3410_21f3),
            (0x28, 0x0010_0073),
        ],
    );
    let _ = ctx.run_until_ebreak();
    assert_eq!(ctx.get_reg(2), exception::ENVIRONMENT_CALL_FROM_M_MODE);
    assert_eq!(ctx.get_reg(3), 8);
    assert_eq!(ctx.get_csr(MCAUSE), 11);
}

#[test]
fn illegal_instruction_traps() {
    let mut ctx = TestContext::new().load_sparse(
        16,
        &[
            (0x00, 0x0200_0093),
            (0x04, 0x3050_9073),
            (0x08, 0xFFFF_FFFF),
            (0x20, 0x3420_2173),
            (0x24, 0x3410_21f3),
            (0x28, 0x0010_0073),
        ],
    );
    let _ = ctx.run_until_ebreak();
    assert_eq!(ctx.get_reg(2), exception::ILLEGAL_INSTRUCTION);
    assert_eq!(ctx.get_reg(3), 8);
}

#[test]
fn csr_read_modify_write() {
    let mut program = vec![
        0x0aa0_0093,
        0x3050_9173,
        0x0550_0193,
        0x3051_a273,
        0x3051_b2f3,
        I::new().jal(0, 0).build(),
    ];
    program.resize(16, NOP);
    let mut ctx = TestContext::new().load_program(0, &program);
    ctx.run(300);
    assert_eq!(ctx.get_reg(2), 0);
    assert_eq!(ctx.get_reg(4), 0xAA);
    assert_eq!(ctx.get_reg(5), 0xFF);
    assert_eq!(ctx.get_csr(MTVEC), 0xAA);
}

#[test]
fn csr_immediate_forms() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            I::new().csrrwi(1, MTVEC, 0x1F).build(),
            I::new().csrrsi(2, MTVEC, 0x0).build(),
            I::new().csrrci(3, MTVEC, 0x3).build(),
            I::new().csrrs(4, MTVEC, 0).build(),
            I::new().ebreak().build(),
        ],
    );
    let _ = ctx.run_until_ebreak();
    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.get_reg(2), 0x1F);
    assert_eq!(ctx.get_reg(3), 0x1F);
    assert_eq!(ctx.get_reg(4), 0x1C);
}

#[test]
fn back_to_back_forwarding_through_trap_and_mret() {
    let mut ctx = TestContext::new().load_sparse(
        64,
        &[
            (0x00, 0x00a0_0093),
            (0x04, 0x0010_8133),
            (0x08, 0x0400_0193),
            (0x0C, 0x3051_9073),
            (0x10, 0x0000_0073),
            (0x40, 0x0800_0213),
            (0x44, 0x3412_1073),
            (0x48, 0x3020_0073),
            (0x80, 0x0010_0513),
            (0x84, 0x0010_0073),
        ],
    );
    let _ = ctx.run_until_ebreak();
    assert_eq!(ctx.get_reg(2), 20);
    assert_eq!(ctx.get_reg(10), 1);
    assert_eq!(ctx.get_reg(4), 0x80);
}

#[test]
fn timer_interrupt_enters_handler() {
    let mut ctx = TestContext::new().load_sparse(
        32,
        &[
            (0x00, 0x0400_0093),
            (0x04, 0x3050_9073),
            (0x08, 0x0080_0093),
            (0x0C, 0x3000_a073),
            (0x10, 0x0800_0093),
            (0x14, 0x3040_a073),
            (0x18, 0x4000_40b7),
            (0x1C, 0x0080_8093),
            (0x20, 0x0640_0113),
            (0x24, 0x0020_a023),
            (0x28, I::new().sw(1, 0, 4).build()),
            (0x2C, 0x0000_006f),
            (0x40, 0x0010_0513),
            (0x44, 0x0010_0073),
        ],
    );
    let _ = ctx.run_until_ebreak();
    assert_eq!(ctx.get_reg(10), 1);
    assert_eq!(ctx.get_csr(MCAUSE), interrupt::MACHINE_TIMER);
    let mstatus = ctx.get_csr(MSTATUS);
    assert_eq!(mstatus & MSTATUS_MIE, 0);
    assert_eq!(mstatus & MSTATUS_MPIE, MSTATUS_MPIE);
    assert_eq!(ctx.stats().interrupts_taken, 1);
    assert!(ctx.sim.cycles() >= 100);
}

#[test]
fn masked_timer_never_interrupts() {
    let mut ctx = TestContext::new().load_sparse(
        32,
        &[
            (0x00, 0x0400_0093),
            (0x04, 0x3050_9073),
            (0x08, 0x4000_40b7),
            (0x0C, 0x0080_8093),
            (0x10, I::new().sw(1, 0, 0).build()),
            (0x14, I::new().sw(1, 0, 4).build()),
            (0x20, I::new().csrrs(7, MIP, 0).build()),
            (0x24, I::new().addi(6, 0, 3).build()),
            (0x28, I::new().ebreak().build()),
            (0x40, 0x0010_0513),
            (0x44, 0x0010_0073),
        ],
    );
    let _ = ctx.run_until_ebreak();
    assert_eq!(ctx.get_reg(6), 3);
    assert_eq!(ctx.get_reg(7) & MIP_MTIP, MIP_MTIP);
    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.stats().interrupts_taken, 0);
}

/// Arms the timer 100 cycles ahead, then runs a MUL/DIVU/REM loop summing
/// `1..=30`. The handler records `mcause`/`mepc`, disarms the timer and
/// returns into the loop.
fn mdu_loop_with_timer() -> Vec<(u32, u32)> {
    vec![
        (0x00, I::new().addi(1, 0, 0x80).build()),
        (0x04, I::new().csrrw(0, MTVEC, 1).build()),
        (0x08, I::new().csrrs(0, MIE, 1).build()),
        (0x0C, I::new().addi(1, 0, 8).build()),
        (0x10, I::new().csrrs(0, MSTATUS, 1).build()),
        (0x14, I::new().lui(2, 0x40004).build()),
        (0x18, I::new().sw(2, 0, 12).build()),
        (0x1C, I::new().lw(3, 2, 0).build()),
        (0x20, I::new().addi(3, 3, 100).build()),
        (0x24, I::new().sw(2, 3, 8).build()),
        (0x28, I::new().addi(5, 0, 0).build()),
        (0x2C, I::new().addi(6, 0, 30).build()),
        (0x30, I::new().addi(8, 0, 0).build()),
        (0x34, I::new().addi(5, 5, 1).build()),
        (0x38, I::new().mul(9, 5, 5).build()),
        (0x3C, I::new().divu(10, 9, 5).build()),
        (0x40, I::new().add(8, 8, 10).build()),
        (0x44, I::new().rem(11, 9, 5).build()),
        (0x48, I::new().add(8, 8, 11).build()),
        (0x4C, I::new().bne(5, 6, -24).build()),
        (0x50, I::new().ebreak().build()),
        (0x80, I::new().csrrs(20, MCAUSE, 0).build()),
        (0x84, I::new().csrrs(21, MEPC, 0).build()),
        (0x88, I::new().lui(22, 0x40004).build()),
        (0x8C, I::new().addi(23, 0, -1).build()),
        (0x90, I::new().sw(22, 23, 12).build()),
        (0x94, I::new().addi(24, 24, 1).build()),
        (0x98, I::new().mret().build()),
    ]
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(5)]
#[case(32)]
fn timer_interrupt_inside_mdu_loop(#[case] latency: u32) {
    let json = format!(r#"{{ "pipeline": {{ "mdu_latency": {latency} }} }}"#);
    let config = Config::from_json(&json).unwrap();
    let mut ctx = TestContext::with_config(config).load_sparse(64, &mdu_loop_with_timer());
    let _ = ctx.run_until_ebreak();

    assert_eq!(ctx.get_reg(24), 1, "handler runs once");
    assert_eq!(ctx.stats().interrupts_taken, 1);
    assert_eq!(ctx.get_reg(20), interrupt::MACHINE_TIMER);
    let mepc = ctx.get_reg(21);
    assert!((0x34..=0x4C).contains(&mepc), "mepc {mepc:#x} outside the loop");
    assert_eq!(mepc % 4, 0);

    assert_eq!(ctx.get_reg(5), 30);
    assert_eq!(ctx.get_reg(8), (1..=30).sum::<u32>());
    assert_eq!(ctx.get_reg(9), 900);
    assert_eq!(ctx.get_reg(10), 30);
    assert_eq!(ctx.get_reg(11), 0);
}
