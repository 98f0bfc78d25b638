//! Control and Status Register (CSR) file.
//!
//! This module implements the machine-mode CSR subsystem. It provides:
//! 1. **Address Definitions:** Constants for the implemented machine CSRs.
//! 2. **Field Masks:** Bitmasks for `mstatus`, `mie` and `mip`.
//! 3. **Updates:** [`CsrUpdate`], the per-instruction effect on CSR state, shared by
//!    the file's commit and by CSR forwarding in the pipeline.
//! 4. **Register Storage:** [`CsrFile`], with combinational reads and one commit per edge.

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine interrupt enable register CSR address.
pub const MIE: u32 = 0x304;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Machine interrupt pending register CSR address.
pub const MIP: u32 = 0x344;

/// Machine hardware thread ID CSR address.
pub const MHARTID: u32 = 0xF14;

/// Machine Interrupt Enable bit in `mstatus`.
pub const MSTATUS_MIE: u32 = 1 << 3;

/// Machine Previous Interrupt Enable bit in `mstatus`.
pub const MSTATUS_MPIE: u32 = 1 << 7;

/// Machine Previous Privilege field in `mstatus`. Hardwired to M-mode.
pub const MSTATUS_MPP: u32 = 0b11 << 11;

/// Writable bits of `mstatus`.
const MSTATUS_WRITABLE: u32 = MSTATUS_MIE | MSTATUS_MPIE;

/// Machine software interrupt enable bit in `mie`.
pub const MIE_MSIE: u32 = 1 << 3;

/// Machine timer interrupt enable bit in `mie`.
pub const MIE_MTIE: u32 = 1 << 7;

/// Machine external interrupt enable bit in `mie`.
pub const MIE_MEIE: u32 = 1 << 11;

/// Writable bits of `mie`.
const MIE_WRITABLE: u32 = MIE_MSIE | MIE_MTIE | MIE_MEIE;

/// Machine timer interrupt pending bit in `mip`.
pub const MIP_MTIP: u32 = 1 << 7;

/// Mask selecting the base address of `mtvec` (direct mode only).
pub const MTVEC_BASE_MASK: u32 = !0b11;

/// Returns the assembler name of a CSR address, or its hex value.
pub fn name(addr: u32) -> String {
    match addr {
        MSTATUS => "mstatus".to_string(),
        MIE => "mie".to_string(),
        MTVEC => "mtvec".to_string(),
        MEPC => "mepc".to_string(),
        MCAUSE => "mcause".to_string(),
        MIP => "mip".to_string(),
        MHARTID => "mhartid".to_string(),
        other => format!("{other:#05x}"),
    }
}

/// `mstatus` after trap entry: MPIE takes MIE, MIE clears.
pub const fn trap_entry_mstatus(mstatus: u32) -> u32 {
    let mpie = if mstatus & MSTATUS_MIE != 0 {
        MSTATUS_MPIE
    } else {
        0
    };
    (mstatus & !(MSTATUS_MIE | MSTATUS_MPIE)) | mpie
}

/// `mstatus` after MRET: MIE takes MPIE, MPIE sets.
pub const fn mret_mstatus(mstatus: u32) -> u32 {
    let mie = if mstatus & MSTATUS_MPIE != 0 {
        MSTATUS_MIE
    } else {
        0
    };
    (mstatus & !MSTATUS_MIE) | mie | MSTATUS_MPIE
}

/// A synchronous exception or accepted interrupt to be recorded in the CSR file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrapRecord {
    /// Value for `mepc`: the PC of the trapping or interrupted instruction.
    pub pc: u32,
    /// Value for `mcause`.
    pub cause: u32,
}

/// The effect of one instruction on CSR state.
///
/// Carried down the pipeline and applied at Writeback. The same function
/// computes the forwarded value of a CSR for a younger reader, so the file
/// and the forwarding network can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CsrUpdate {
    /// Explicit CSRRW/CSRRS/CSRRC write: `(address, final data)`.
    pub write: Option<(u32, u32)>,
    /// Trap entry. Takes precedence over an explicit write.
    pub exception: Option<TrapRecord>,
    /// MRET exit.
    pub mret: bool,
}

impl CsrUpdate {
    /// An update with no effect.
    pub const NONE: Self = Self {
        write: None,
        exception: None,
        mret: false,
    };

    /// Returns `true` if this update changes any CSR.
    pub const fn is_active(&self) -> bool {
        self.write.is_some() || self.exception.is_some() || self.mret
    }

    /// Applies this update to the stored value `prev` of the CSR at `addr`.
    ///
    /// Read-only and unimplemented addresses are returned unchanged.
    pub const fn apply(&self, addr: u32, prev: u32) -> u32 {
        if let Some(trap) = self.exception {
            return match addr {
                MEPC => trap.pc & !0b11,
                MCAUSE => trap.cause,
                MSTATUS => trap_entry_mstatus(prev),
                _ => prev,
            };
        }
        if self.mret {
            return if addr == MSTATUS {
                mret_mstatus(prev)
            } else {
                prev
            };
        }
        match self.write {
            Some((waddr, data)) if waddr == addr => match addr {
                MSTATUS => (prev & !MSTATUS_WRITABLE) | (data & MSTATUS_WRITABLE),
                MIE => data & MIE_WRITABLE,
                MTVEC | MCAUSE => data,
                MEPC => data & !0b11,
                _ => prev,
            },
            _ => prev,
        }
    }
}

/// Machine-mode CSR storage.
///
/// `mip` is not stored: its timer bit mirrors the live timer request supplied
/// on each read. `mhartid` is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrFile {
    mstatus: u32,
    mie: u32,
    mtvec: u32,
    mepc: u32,
    mcause: u32,
    mhartid: u32,
}

impl CsrFile {
    /// Creates a CSR file in its reset state for hart `hart_id`.
    pub const fn new(hart_id: u32) -> Self {
        Self {
            mstatus: MSTATUS_MPP,
            mie: 0,
            mtvec: 0,
            mepc: 0,
            mcause: 0,
            mhartid: hart_id,
        }
    }

    /// Combinational read of the CSR at `addr`.
    ///
    /// # Arguments
    ///
    /// * `addr` - 12-bit CSR address.
    /// * `timer_irq` - Live timer interrupt request, mirrored into `mip.MTIP`.
    ///
    /// # Returns
    ///
    /// The register value, or 0 for unimplemented addresses.
    pub const fn read(&self, addr: u32, timer_irq: bool) -> u32 {
        match addr {
            MSTATUS => self.mstatus,
            MIE => self.mie,
            MTVEC => self.mtvec,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            MIP => {
                if timer_irq {
                    MIP_MTIP
                } else {
                    0
                }
            }
            MHARTID => self.mhartid,
            _ => 0,
        }
    }

    /// Value presented on `mepc_out` for an MRET redirect.
    pub const fn mepc(&self) -> u32 {
        self.mepc
    }

    /// Trap vector base (`mtvec` with the mode bits cleared).
    pub const fn trap_vector(&self) -> u32 {
        self.mtvec & MTVEC_BASE_MASK
    }

    /// Commits `update` at the clock edge.
    pub const fn clock(&mut self, update: &CsrUpdate) {
        if !update.is_active() {
            return;
        }
        self.mstatus = update.apply(MSTATUS, self.mstatus);
        self.mie = update.apply(MIE, self.mie);
        self.mtvec = update.apply(MTVEC, self.mtvec);
        self.mepc = update.apply(MEPC, self.mepc);
        self.mcause = update.apply(MCAUSE, self.mcause);
    }
}
