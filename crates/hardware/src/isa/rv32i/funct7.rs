//! `funct7` values (instruction bits 31:25) for R-type and shift-immediate
//! encodings.

/// Plain form: `add`, `srl`, `srli`.
pub const DEFAULT: u32 = 0b000_0000;

/// Alternate form selected by instruction bit 30: `sub`, `sra`, `srai`.
pub const ALT: u32 = 0b010_0000;
