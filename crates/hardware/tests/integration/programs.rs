//! Canonical programs, each checked under several chip configurations.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::config::Config;

use crate::common::{InstructionBuilder as I, TestContext};

fn config(json: &str) -> Config {
    Config::from_json(json).unwrap_or_else(|e| panic!("{e}"))
}

fn run(config: Config, program: &[u32]) -> TestContext {
    let mut ctx = TestContext::with_config(config).load_program(0, program);
    let _ = ctx.run_until_ebreak();
    ctx
}

#[rstest]
#[case::bimodal(config("{}"))]
#[case::static_predictor(config(r#"{ "pipeline": { "branch_predictor": "Static" } }"#))]
#[case::uncached(config(
    r#"{ "cache": {
        "l1_i": { "enabled": false, "lines": 64 },
        "l1_d": { "enabled": false, "lines": 64 },
        "l2": { "enabled": false, "lines": 256 } } }"#
))]
#[case::fast_mdu(config(r#"{ "pipeline": { "mdu_latency": 1 } }"#))]
#[case::tiny_caches(config(
    r#"{ "cache": {
        "l1_i": { "lines": 1 },
        "l1_d": { "lines": 1 },
        "l2": { "lines": 2 } } }"#
))]
fn basic_arithmetic_and_memory(#[case] cfg: Config) {
    let ctx = run(
        cfg,
        &[
            0x00a0_0093,
            0x0140_0113,
            0x0020_81b3,
            0x0000_12b7,
            0x0032_a023,
            0x0002_a203,
            0x0010_0073,
        ],
    );
    assert_eq!(ctx.get_reg(1), 10);
    assert_eq!(ctx.get_reg(2), 20);
    assert_eq!(ctx.get_reg(3), 30);
    assert_eq!(ctx.get_reg(4), 30);
    assert_eq!(ctx.get_reg(5), 0x1000);
    assert_eq!(ctx.get_mem(0x1000), 30);
}

#[rstest]
#[case::bimodal(config("{}"))]
#[case::static_predictor(config(r#"{ "pipeline": { "branch_predictor": "Static" } }"#))]
#[case::uncached(config(
    r#"{ "cache": {
        "l1_i": { "enabled": false, "lines": 64 },
        "l1_d": { "enabled": false, "lines": 64 },
        "l2": { "enabled": false, "lines": 256 } } }"#
))]
fn data_hazards_and_load_use(#[case] cfg: Config) {
    let ctx = run(
        cfg,
        &[
            0x00a0_0093,
            0x0140_0113,
            0x0020_81b3,
            0x0011_8233,
            0x0041_82b3,
            0x0000_1337,
            0x0053_2023,
            0x0003_2383,
            0x0013_8433,
            0x0010_0073,
        ],
    );
    assert_eq!(ctx.get_reg(3), 30);
    assert_eq!(ctx.get_reg(4), 40);
    assert_eq!(ctx.get_reg(5), 70);
    assert_eq!(ctx.get_reg(7), 70);
    assert_eq!(ctx.get_reg(8), 80);
    assert!(ctx.stats().stalls_load_use >= 1);
}

#[rstest]
#[case::bimodal(config("{}"))]
#[case::static_predictor(config(r#"{ "pipeline": { "branch_predictor": "Static" } }"#))]
fn taken_branch_and_jal_skip_their_shadows(#[case] cfg: Config) {
    let ctx = run(
        cfg,
        &[
            0x00a0_0093,
            0x00a0_0113,
            0x0020_8463,
            0x0010_0193,
            0x0050_0213,
            0x0080_02ef,
            0x0010_0313,
            0x0010_0073,
        ],
    );
    assert_eq!(ctx.get_reg(1), 10);
    assert_eq!(ctx.get_reg(2), 10);
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.get_reg(4), 5);
    assert_eq!(ctx.get_reg(5), 0x18);
    assert_eq!(ctx.get_reg(6), 0);
}

#[rstest]
#[case::slow_mdu(config(r#"{ "pipeline": { "mdu_latency": 32 } }"#))]
#[case::fast_mdu(config(r#"{ "pipeline": { "mdu_latency": 1 } }"#))]
#[case::immediate_mdu(config(r#"{ "pipeline": { "mdu_latency": 0 } }"#))]
fn multiply_divide_remainder(#[case] cfg: Config) {
    let ctx = run(
        cfg,
        &[
            0x00a0_0093,
            0x0050_0113,
            0x0220_81b3,
            0x0640_0213,
            0x0222_42b3,
            0x0070_0313,
            0x0262_63b3,
            0x0010_0073,
        ],
    );
    assert_eq!(ctx.get_reg(3), 50);
    assert_eq!(ctx.get_reg(5), 20);
    assert_eq!(ctx.get_reg(7), 2);
}

#[test]
fn mdu_latency_shows_in_stall_count() {
    let program = [
        0x00a0_0093,
        0x0050_0113,
        0x0220_81b3,
        0x0010_0073,
    ];
    let slow = run(config(r#"{ "pipeline": { "mdu_latency": 32 } }"#), &program);
    let fast = run(config(r#"{ "pipeline": { "mdu_latency": 2 } }"#), &program);
    assert_eq!(slow.get_reg(3), 50);
    assert_eq!(slow.stats().stalls_mdu - fast.stats().stalls_mdu, 30);
}

#[test]
fn register_register_alu() {
    let ctx = run(
        Config::default(),
        &[
            0x00a0_0093,
            0x0050_0113,
            0x0020_81b3,
            0x4020_8233,
            0x0020_f2b3,
            0x0020_e333,
            0x0020_c3b3,
            0x0020_9433,
            0x0020_54b3,
            0x0011_2533,
            0x0010_0073,
        ],
    );
    let expected = [
        (1, 10),
        (2, 5),
        (3, 15),
        (4, 5),
        (5, 0),
        (6, 15),
        (7, 15),
        (8, 320),
        (9, 0),
        (10, 1),
    ];
    for (reg, value) in expected {
        assert_eq!(ctx.get_reg(reg), value, "x{reg}");
    }
}

#[test]
fn byte_stores_and_sign_extending_loads() {
    let ctx = run(
        Config::default(),
        &[
            0x0000_10b7,
            0x0ab0_0113,
            0x0020_8023,
            0x0cd0_0193,
            0x0030_80a3,
            0x0ef0_0213,
            0x0040_8123,
            0x0120_0293,
            0x0050_81a3,
            0x0000_a303,
            0x0000_8383,
            0x0000_c403,
            0x0010_0073,
        ],
    );
    assert_eq!(ctx.get_reg(6), 0x12EF_CDAB);
    assert_eq!(ctx.get_reg(7), 0xFFFF_FFAB);
    assert_eq!(ctx.get_reg(8), 0xAB);
    assert_eq!(ctx.get_mem(0x1000), 0x12EF_CDAB);
}

#[test]
fn halfword_access() {
    let ctx = run(
        Config::default(),
        &[
            I::new().lui(1, 0x1).build(),
            I::new().addi(2, 0, -2).build(),
            I::new().sh(1, 2, 2).build(),
            I::new().lh(3, 1, 2).build(),
            I::new().lhu(4, 1, 2).build(),
            I::new().lw(5, 1, 0).build(),
            I::new().ebreak().build(),
        ],
    );
    assert_eq!(ctx.get_reg(3), 0xFFFF_FFFE);
    assert_eq!(ctx.get_reg(4), 0xFFFE);
    assert_eq!(ctx.get_reg(5), 0xFFFE_0000);
}

#[test]
fn jalr_and_auipc() {
    let ctx = run(
        Config::default(),
        &[
            I::new().auipc(1, 0).build(),
            I::new().jalr(2, 1, 16).build(),
            I::new().addi(3, 0, 1).build(),
            I::new().addi(3, 0, 2).build(),
            I::new().addi(4, 0, 7).build(),
            I::new().ebreak().build(),
        ],
    );
    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.get_reg(2), 8);
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.get_reg(4), 7);
}

#[test]
fn writes_to_x0_are_discarded() {
    let ctx = run(
        Config::default(),
        &[
            I::new().addi(0, 0, 5).build(),
            I::new().add(1, 0, 0).build(),
            I::new().ebreak().build(),
        ],
    );
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.get_reg(1), 0);
}

fn counting_loop() -> Vec<u32> {
    vec![
        I::new().addi(5, 0, 0).build(),
        I::new().addi(6, 0, 20).build(),
        I::new().addi(5, 5, 1).build(),
        I::new().bne(5, 6, -4).build(),
        I::new().ebreak().build(),
    ]
}

#[test]
fn bimodal_learns_the_loop_branch() {
    let ctx = run(Config::default(), &counting_loop());
    assert_eq!(ctx.get_reg(5), 20);
    let stats = ctx.stats();
    assert_eq!(stats.branch_mispredictions, 2);
    assert_eq!(stats.branch_predictions, 18);
}

#[test]
fn static_predictor_misses_every_taken_branch() {
    let ctx = run(
        config(r#"{ "pipeline": { "branch_predictor": "Static" } }"#),
        &counting_loop(),
    );
    assert_eq!(ctx.get_reg(5), 20);
    assert_eq!(ctx.stats().branch_mispredictions, 19);
}

#[test]
fn uart_receives_stored_bytes() {
    let mut program = vec![I::new().lui(1, 0x40000).build()];
    for byte in b"Hi\n" {
        program.push(I::new().addi(2, 0, i32::from(*byte)).build());
        program.push(I::new().sb(1, 2, 0).build());
    }
    program.push(I::new().ebreak().build());
    let ctx = run(Config::default(), &program);
    assert_eq!(ctx.sim.uart_output(), b"Hi\n".to_vec());
}

#[test]
fn caches_warm_up() {
    let ctx = run(Config::default(), &counting_loop());
    let stats = ctx.stats();
    assert!(stats.l1_i.misses >= 1);
    assert!(stats.l1_i.hits > stats.l1_i.misses);
    assert!(stats.l2.misses >= 1);
    assert!(stats.instructions_retired >= 2 + 2 * 20);
}
