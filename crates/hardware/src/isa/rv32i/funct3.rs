//! `funct3` values (instruction bits 14:12) for the base integer opcodes.
//!
//! The same 3-bit value means different things under different major
//! opcodes, so the constants are grouped by the opcode that gives them meaning.

// OP_LOAD: access width and sign extension.

/// `lb`
pub const LB: u32 = 0b000;
/// `lh`
pub const LH: u32 = 0b001;
/// `lw`
pub const LW: u32 = 0b010;
/// `lbu`
pub const LBU: u32 = 0b100;
/// `lhu`
pub const LHU: u32 = 0b101;

// OP_STORE: access width.

/// `sb`
pub const SB: u32 = 0b000;
/// `sh`
pub const SH: u32 = 0b001;
/// `sw`
pub const SW: u32 = 0b010;

// OP_BRANCH: comparison.

/// `beq`: taken when `rs1 == rs2`.
pub const BEQ: u32 = 0b000;
/// `bne`: taken when `rs1 != rs2`.
pub const BNE: u32 = 0b001;
/// `blt`: signed `rs1 < rs2`.
pub const BLT: u32 = 0b100;
/// `bge`: signed `rs1 >= rs2`.
pub const BGE: u32 = 0b101;
/// `bltu`: unsigned `rs1 < rs2`.
pub const BLTU: u32 = 0b110;
/// `bgeu`: unsigned `rs1 >= rs2`.
pub const BGEU: u32 = 0b111;

// OP_REG and OP_IMM: ALU function. `funct7` picks between the paired entries.

/// `add`/`sub` (`addi` for immediates).
pub const ADD_SUB: u32 = 0b000;
/// `sll`/`slli`
pub const SLL: u32 = 0b001;
/// `slt`/`slti`
pub const SLT: u32 = 0b010;
/// `sltu`/`sltiu`
pub const SLTU: u32 = 0b011;
/// `xor`/`xori`
pub const XOR: u32 = 0b100;
/// `srl`/`sra` and their immediate forms.
pub const SRL_SRA: u32 = 0b101;
/// `or`/`ori`
pub const OR: u32 = 0b110;
/// `and`/`andi`
pub const AND: u32 = 0b111;
