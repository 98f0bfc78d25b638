//! Multiply/Divide Unit (MDU).
//!
//! A multi-cycle unit modelled as `Idle -> Busy(n) -> Done`. The result is
//! computed when the operation is latched; the countdown models the
//! iterative shift-add / restoring-division latency. `Done` persists until
//! the next `start`, so a stalled Execute stage can still collect the result.

/// Closed-form multiply/divide results.
pub mod arithmetic;

use crate::isa::rv32m::funct3;

/// M-extension operation, indexed by `funct3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MduOp {
    /// Low 32 bits of the product.
    Mul,
    /// High 32 bits, signed x signed.
    Mulh,
    /// High 32 bits, signed x unsigned.
    Mulhsu,
    /// High 32 bits, unsigned x unsigned.
    Mulhu,
    /// Signed quotient.
    Div,
    /// Unsigned quotient.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

impl MduOp {
    /// Maps a `funct3` value of an OP/MULDIV instruction to its operation.
    pub const fn from_funct3(f3: u32) -> Self {
        match f3 & 0x7 {
            funct3::MUL => Self::Mul,
            funct3::MULH => Self::Mulh,
            funct3::MULHSU => Self::Mulhsu,
            funct3::MULHU => Self::Mulhu,
            funct3::DIV => Self::Div,
            funct3::DIVU => Self::Divu,
            funct3::REM => Self::Rem,
            _ => Self::Remu,
        }
    }
}

/// MDU sequencing state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MduState {
    /// No operation latched since reset.
    #[default]
    Idle,
    /// Counting down; `remaining` edges until the result is ready.
    Busy {
        /// Remaining clock edges.
        remaining: u32,
    },
    /// Result available.
    Done,
}

/// Multiply/Divide Unit.
#[derive(Debug)]
pub struct Mdu {
    state: MduState,
    latency: u32,
    result: u32,
}

impl Mdu {
    /// Creates an idle MDU with the given latency in cycles.
    pub const fn new(latency: u32) -> Self {
        Self {
            state: MduState::Idle,
            latency,
            result: 0,
        }
    }

    /// Latches an operation (clock edge). Ignored while busy.
    pub fn start(&mut self, op: MduOp, a: u32, b: u32) {
        if self.busy() {
            tracing::warn!(?op, "MDU start while busy ignored");
            return;
        }
        self.result = arithmetic::compute(op, a, b);
        self.state = if self.latency == 0 {
            MduState::Done
        } else {
            MduState::Busy {
                remaining: self.latency,
            }
        };
    }

    /// Advances the countdown by one clock edge.
    pub const fn clock(&mut self) {
        if let MduState::Busy { remaining } = self.state {
            self.state = if remaining <= 1 {
                MduState::Done
            } else {
                MduState::Busy {
                    remaining: remaining - 1,
                }
            };
        }
    }

    /// `true` while an operation is in flight.
    pub const fn busy(&self) -> bool {
        matches!(self.state, MduState::Busy { .. })
    }

    /// `true` once the latched operation has completed.
    pub const fn ready(&self) -> bool {
        matches!(self.state, MduState::Done)
    }

    /// The latched result; valid when [`ready`](Self::ready).
    pub const fn result(&self) -> u32 {
        self.result
    }

    /// Current state.
    pub const fn state(&self) -> MduState {
        self.state
    }
}
