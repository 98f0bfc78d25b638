//! `funct3` values of the RV32M instructions (`funct7 == MULDIV`).

/// `mul`: low 32 bits of the product.
pub const MUL: u32 = 0b000;
/// `mulh`: high word, signed by signed.
pub const MULH: u32 = 0b001;
/// `mulhsu`: high word, signed by unsigned.
pub const MULHSU: u32 = 0b010;
/// `mulhu`: high word, unsigned by unsigned.
pub const MULHU: u32 = 0b011;
/// `div`
pub const DIV: u32 = 0b100;
/// `divu`
pub const DIVU: u32 = 0b101;
/// `rem`
pub const REM: u32 = 0b110;
/// `remu`
pub const REMU: u32 = 0b111;
