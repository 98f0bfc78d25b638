//! Trap and simulator error definitions.
//!
//! This module defines the two failure vocabularies of the simulator. It provides:
//! 1. **Trap Representation:** Architectural exceptions and interrupts that redirect
//!    the pipeline to `mtvec`. These are never fatal to the simulator.
//! 2. **Simulator Errors:** Host-level failures (I/O, malformed images, run bounds)
//!    reported to the caller through [`SimResult`].

use std::fmt;

use thiserror::Error;

use crate::isa::privileged::cause::{exception, interrupt};

/// Machine-mode traps taken by the RV32IM core.
///
/// Traps cause the processor to transfer control to the handler at `mtvec`
/// after recording `mepc` and `mcause`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Illegal instruction exception.
    ///
    /// Raised when an instruction encoding is not part of RV32IM or the
    /// supported system subset. The associated value is the encoding.
    IllegalInstruction(u32),

    /// Environment call from machine mode (`ECALL`).
    EnvironmentCallFromMMode,

    /// Machine timer interrupt.
    ///
    /// Raised while `mtime >= mtimecmp` and both `mstatus.MIE` and
    /// `mie.MTIE` are set.
    MachineTimerInterrupt,
}

impl Trap {
    /// Returns the `mcause` value for this trap.
    ///
    /// Interrupts have bit 31 set; the low bits carry the exception or
    /// interrupt code.
    pub const fn cause(self) -> u32 {
        match self {
            Self::IllegalInstruction(_) => exception::ILLEGAL_INSTRUCTION,
            Self::EnvironmentCallFromMMode => exception::ENVIRONMENT_CALL_FROM_M_MODE,
            Self::MachineTimerInterrupt => interrupt::MACHINE_TIMER,
        }
    }

    /// Returns `true` if this trap is an asynchronous interrupt.
    pub const fn is_interrupt(self) -> bool {
        matches!(self, Self::MachineTimerInterrupt)
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({inst:#010x})"),
            Self::EnvironmentCallFromMMode => write!(f, "EnvironmentCallFromMMode"),
            Self::MachineTimerInterrupt => write!(f, "MachineTimerInterrupt"),
        }
    }
}

impl std::error::Error for Trap {}

/// Errors reported by the simulator to its caller.
///
/// None of these are architectural; a running program can never raise one.
#[derive(Debug, Error)]
pub enum SimError {
    /// A run bound was exceeded before the awaited condition held.
    #[error("timed out after {cycles} cycles waiting for {waiting_for}")]
    Timeout {
        /// Cycles simulated before giving up.
        cycles: u64,
        /// Human-readable description of the awaited condition.
        waiting_for: String,
    },

    /// Reading a program image from disk failed.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An ELF image could not be parsed.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::read::Error),

    /// A hex image line was not a 32-bit hexadecimal word.
    #[error("invalid hex image at line {line}: '{text}'")]
    InvalidHex {
        /// One-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// A program image does not fit in main memory.
    #[error("image of {len} bytes at {base:#010x} does not fit in {capacity} bytes of RAM")]
    ImageTooLarge {
        /// Load address.
        base: u32,
        /// Image length in bytes.
        len: usize,
        /// RAM capacity in bytes.
        capacity: usize,
    },

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A hart index was out of range for the configured chip.
    #[error("no hart {0} in this chip")]
    NoSuchHart(usize),
}

/// Convenience alias for fallible simulator operations.
pub type SimResult<T> = Result<T, SimError>;
