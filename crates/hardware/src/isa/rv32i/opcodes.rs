//! Major opcodes (instruction bits 6:0) decoded by the RV32I control unit.

/// `lb`, `lh`, `lw`, `lbu`, `lhu`.
pub const OP_LOAD: u32 = 0b000_0011;
/// `fence`, decoded as a no-op.
pub const OP_MISC_MEM: u32 = 0b000_1111;
/// Register-immediate ALU operations.
pub const OP_IMM: u32 = 0b001_0011;
/// `auipc`
pub const OP_AUIPC: u32 = 0b001_0111;
/// `sb`, `sh`, `sw`.
pub const OP_STORE: u32 = 0b010_0011;
/// Register-register ALU operations, including RV32M.
pub const OP_REG: u32 = 0b011_0011;
/// `lui`
pub const OP_LUI: u32 = 0b011_0111;
/// Conditional branches.
pub const OP_BRANCH: u32 = 0b110_0011;
/// `jalr`
pub const OP_JALR: u32 = 0b110_0111;
/// `jal`
pub const OP_JAL: u32 = 0b110_1111;
