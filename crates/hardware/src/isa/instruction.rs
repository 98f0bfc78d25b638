//! Field extraction for 32-bit RV32 encodings and the decoded form carried
//! through the pipeline latches.

/// Opcode, bits 6:0.
pub const OPCODE_MASK: u32 = 0x7F;
/// Any 5-bit register specifier.
pub const REG_MASK: u32 = 0x1F;
/// `funct3`, bits 14:12.
pub const FUNCT3_MASK: u32 = 0x7;
/// `funct7`, bits 31:25.
pub const FUNCT7_MASK: u32 = 0x7F;
/// CSR address, bits 31:20.
pub const CSR_MASK: u32 = 0xFFF;

/// Raw field accessors on an instruction word.
///
/// Every field is extracted unconditionally; whether it is meaningful depends
/// on the instruction format selected by the opcode.
pub trait InstructionBits {
    /// Bits 6:0.
    fn opcode(&self) -> u32;

    /// Bits 11:7.
    fn rd(&self) -> usize;

    /// Bits 19:15.
    fn rs1(&self) -> usize;

    /// Bits 24:20.
    fn rs2(&self) -> usize;

    /// Bits 14:12.
    fn funct3(&self) -> u32;

    /// Bits 31:25.
    fn funct7(&self) -> u32;

    /// Bits 31:20, read as an unsigned CSR address.
    fn csr(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        (self >> 20) & CSR_MASK
    }
}

/// Immediate encoding formats of the base ISA.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ImmFormat {
    /// Register-register; no immediate.
    #[default]
    R,
    /// 12-bit signed immediate in bits 31:20.
    I,
    /// 12-bit signed immediate split over bits 31:25 and 11:7.
    S,
    /// 13-bit signed, even branch offset.
    B,
    /// Upper 20 bits, low 12 bits zero.
    U,
    /// 21-bit signed, even jump offset.
    J,
}

/// An instruction word split into its fields.
///
/// Produced by [`crate::isa::decode::decode`] in the Decode stage and carried
/// down the pipeline inside the ID/EX latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// The encoding as fetched.
    pub raw: u32,
    /// Major opcode.
    pub opcode: u32,
    /// Destination register.
    pub rd: usize,
    /// First source register.
    pub rs1: usize,
    /// Second source register.
    pub rs2: usize,
    /// `funct3` field.
    pub funct3: u32,
    /// `funct7` field.
    pub funct7: u32,
    /// Immediate format selected by the opcode.
    pub format: ImmFormat,
    /// Sign-extended immediate value (zero for R-type).
    pub imm: i32,
}
