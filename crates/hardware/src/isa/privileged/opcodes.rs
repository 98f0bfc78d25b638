//! SYSTEM-opcode encodings: the fixed words of the non-CSR instructions and
//! the `funct3` values of the six Zicsr forms.

/// Major opcode shared by every SYSTEM instruction.
pub const OP_SYSTEM: u32 = 0b111_0011;

/// `ecall`
pub const ECALL: u32 = 0x0000_0073;

/// `ebreak`. Executes as a no-op; the simulator stops when one commits.
pub const EBREAK: u32 = 0x0010_0073;

/// `mret`
pub const MRET: u32 = 0x3020_0073;

/// `wfi`, executed as a no-op.
pub const WFI: u32 = 0x1050_0073;

/// `funct3` of ECALL, EBREAK, MRET and WFI; the full word tells them apart.
pub const PRIV: u32 = 0b000;

/// `csrrw`: swap `rs1` into the CSR.
pub const CSRRW: u32 = 0b001;
/// `csrrs`: set the bits of `rs1`.
pub const CSRRS: u32 = 0b010;
/// `csrrc`: clear the bits of `rs1`.
pub const CSRRC: u32 = 0b011;
/// `csrrwi`: swap the zero-extended `uimm`.
pub const CSRRWI: u32 = 0b101;
/// `csrrsi`
pub const CSRRSI: u32 = 0b110;
/// `csrrci`
pub const CSRRCI: u32 = 0b111;
