//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** The Control Unit's coarse ALU class and the
//!    ALU Control Unit's concrete operation, each with its hardware encoding.
//! 2. **Operand Selection:** Register, PC or immediate sources for the ALU.
//! 3. **Memory and Register Control:** Read/write enables and result selection.
//! 4. **System Control:** CSR access and the ECALL/EBREAK/MRET classification.

/// Concrete ALU operation produced by the ALU Control Unit.
///
/// Discriminants are the 4-bit control codes: bit 3 selects the alternate
/// form (SUB, SRA) of the funct3 operation in bits 2:0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AluOp {
    /// Wrap-around addition.
    #[default]
    Add = 0b0000,

    /// Shift left logical.
    Sll = 0b0001,

    /// Set less than (signed).
    Slt = 0b0010,

    /// Set less than unsigned.
    Sltu = 0b0011,

    /// Bitwise XOR.
    Xor = 0b0100,

    /// Shift right logical.
    Srl = 0b0101,

    /// Bitwise OR.
    Or = 0b0110,

    /// Bitwise AND.
    And = 0b0111,

    /// Wrap-around subtraction.
    Sub = 0b1000,

    /// Pass operand B through (LUI).
    Lui = 0b1001,

    /// Shift right arithmetic.
    Sra = 0b1101,
}

impl AluOp {
    /// Every defined operation, in control-code order.
    pub const ALL: [Self; 11] = [
        Self::Add,
        Self::Sll,
        Self::Slt,
        Self::Sltu,
        Self::Xor,
        Self::Srl,
        Self::Or,
        Self::And,
        Self::Sub,
        Self::Lui,
        Self::Sra,
    ];

    /// Returns the 4-bit control code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a 4-bit control code; undefined codes yield `None`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b0000 => Some(Self::Add),
            0b0001 => Some(Self::Sll),
            0b0010 => Some(Self::Slt),
            0b0011 => Some(Self::Sltu),
            0b0100 => Some(Self::Xor),
            0b0101 => Some(Self::Srl),
            0b0110 => Some(Self::Or),
            0b0111 => Some(Self::And),
            0b1000 => Some(Self::Sub),
            0b1001 => Some(Self::Lui),
            0b1101 => Some(Self::Sra),
            _ => None,
        }
    }
}

/// Coarse ALU operation class emitted by the Control Unit.
///
/// Discriminants are the 3-bit `alu_operation_code` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum AluOpClass {
    /// Address or PC arithmetic (loads, stores, AUIPC, JAL, JALR): always ADD.
    #[default]
    Add = 0b000,
    /// Conditional branch comparison.
    Branch = 0b001,
    /// Register-register arithmetic.
    RType = 0b010,
    /// Register-immediate arithmetic.
    IType = 0b011,
    /// Load upper immediate pass-through.
    Lui = 0b100,
}

/// Source of ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use value from rs1.
    #[default]
    Reg1,
    /// Use the program counter (AUIPC).
    Pc,
}

/// Source of ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use value from rs2.
    #[default]
    Reg2,
    /// Use the sign-extended immediate.
    Imm,
}

/// CSR operation kind (CSRRW/CSRRS/CSRRC and immediate forms).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CsrOp {
    /// Not a CSR instruction.
    #[default]
    None,
    /// Read/Write.
    Rw,
    /// Read/Set bits.
    Rs,
    /// Read/Clear bits.
    Rc,
    /// Read/Write immediate.
    Rwi,
    /// Read/Set bits immediate.
    Rsi,
    /// Read/Clear bits immediate.
    Rci,
}

impl CsrOp {
    /// Returns `true` for the immediate forms, whose source is the zero-extended
    /// `rs1` field instead of a register.
    pub const fn uses_immediate(self) -> bool {
        matches!(self, Self::Rwi | Self::Rsi | Self::Rci)
    }

    /// Computes the value written back to the CSR.
    pub const fn apply(self, old: u32, src: u32) -> u32 {
        match self {
            Self::None => old,
            Self::Rw | Self::Rwi => src,
            Self::Rs | Self::Rsi => old | src,
            Self::Rc | Self::Rci => old & !src,
        }
    }
}

/// System instruction classification for `funct3 == 0` SYSTEM encodings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SystemOp {
    /// Not a privileged system instruction.
    #[default]
    None,
    /// Environment call: synchronous trap with cause 11.
    Ecall,
    /// Terminal marker; executes as a no-op.
    Ebreak,
    /// Return from machine trap.
    Mret,
    /// Wait for interrupt; executes as a no-op.
    Wfi,
}

/// Control signals generated by the Control Unit.
///
/// A bubble carries `ControlSignals::default()`, which has every enable clear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Write the result to `rd`.
    pub reg_write: bool,
    /// ALU operand B is the immediate (`alu_src`).
    pub alu_src: bool,
    /// ALU operand A is the PC (`alu_src_a`).
    pub alu_src_a: bool,
    /// Load from memory.
    pub mem_read: bool,
    /// Store to memory.
    pub mem_write: bool,
    /// Write-back value comes from memory.
    pub mem_to_reg: bool,
    /// Conditional branch.
    pub branch: bool,
    /// Unconditional jump (JAL/JALR); writes the link address.
    pub jump: bool,
    /// Write the CSR addressed by the instruction.
    pub csr_write: bool,
    /// Write-back value is the old CSR value.
    pub csr_to_reg: bool,
    /// Coarse ALU operation class.
    pub alu_op: AluOpClass,
    /// CSR operation kind.
    pub csr_op: CsrOp,
    /// Privileged system instruction (`funct3 == 0`); refined by the raw encoding.
    pub system: bool,
    /// The opcode is not part of the implemented ISA.
    pub illegal: bool,
}

impl ControlSignals {
    /// Operand A source select.
    pub const fn a_src(&self) -> OpASrc {
        if self.alu_src_a {
            OpASrc::Pc
        } else {
            OpASrc::Reg1
        }
    }

    /// Operand B source select.
    pub const fn b_src(&self) -> OpBSrc {
        if self.alu_src { OpBSrc::Imm } else { OpBSrc::Reg2 }
    }
}
