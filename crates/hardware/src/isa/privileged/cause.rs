//! `mcause` values for the traps this core can take.
//!
//! Bit 31 separates interrupts from synchronous exceptions; the remaining
//! bits hold the cause code.

/// Set in `mcause` when the trap was an interrupt.
pub const INTERRUPT_BIT: u32 = 0x8000_0000;

/// Asynchronous causes.
pub mod interrupt {
    use super::INTERRUPT_BIT;

    /// Machine timer interrupt, code 7.
    pub const MACHINE_TIMER: u32 = INTERRUPT_BIT | 7;
}

/// Synchronous causes.
pub mod exception {
    /// Undecodable instruction word.
    pub const ILLEGAL_INSTRUCTION: u32 = 2;
    /// `ecall` from machine mode.
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u32 = 11;
}
