//! RV32I encodings: major opcodes plus the `funct3`/`funct7` sub-fields
//! that select an operation within each opcode.

/// `funct3` values grouped by major opcode.
pub mod funct3;

/// `funct7` values for R-type and shift-immediate encodings.
pub mod funct7;

/// Major opcodes (bits 6:0).
pub mod opcodes;
