//! RISC-V Integer Multiplication and Division Extension (M).
//!
//! M instructions share the `OP_REG` major opcode and are selected by
//! `funct7 == MULDIV`; `funct3` picks the operation.

/// Function code 3 definitions for the M extension.
pub mod funct3;

/// `funct7` value that marks an `OP_REG` instruction as a multiply/divide.
pub const MULDIV: u32 = 0b000_0001;
