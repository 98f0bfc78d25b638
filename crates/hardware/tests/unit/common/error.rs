//! Trap causes and simulator error messages.

use rvpipe_core::common::{SimError, Trap};

#[test]
fn trap_causes_match_mcause_encoding() {
    assert_eq!(Trap::IllegalInstruction(0).cause(), 2);
    assert_eq!(Trap::EnvironmentCallFromMMode.cause(), 11);
    assert_eq!(Trap::MachineTimerInterrupt.cause(), 0x8000_0007);
}

#[test]
fn only_timer_trap_is_interrupt() {
    assert!(Trap::MachineTimerInterrupt.is_interrupt());
    assert!(!Trap::EnvironmentCallFromMMode.is_interrupt());
    assert!(!Trap::IllegalInstruction(0xFFFF_FFFF).is_interrupt());
}

#[test]
fn timeout_message_names_the_condition() {
    let err = SimError::Timeout {
        cycles: 500,
        waiting_for: "ebreak".to_string(),
    };
    assert_eq!(err.to_string(), "timed out after 500 cycles waiting for ebreak");
}

#[test]
fn illegal_instruction_displays_encoding() {
    assert_eq!(
        Trap::IllegalInstruction(0xFFFF_FFFF).to_string(),
        "IllegalInstruction(0xffffffff)"
    );
}
