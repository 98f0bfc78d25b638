//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Instruction Constants:** Width of an instruction and the canonical NOP.
//! 2. **Memory Constants:** Word size and the cache line geometry shared by every level.
//! 3. **Simulation Constants:** Default bound for open-ended runs.

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Canonical no-op (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;

/// Bytes per memory word.
pub const WORD_BYTES: u32 = 4;

/// Words per cache line at every cache level.
pub const LINE_WORDS: usize = 4;

/// Bytes per cache line.
pub const LINE_BYTES: u32 = (LINE_WORDS as u32) * WORD_BYTES;

/// Cycle bound used by run helpers when `general.max_cycles` is not set.
pub const DEFAULT_MAX_CYCLES: u64 = 1_000_000;
