//! Trap Handling Utilities.
//!
//! This module decides whether a pending interrupt may be taken. It performs
//! the following:
//! 1. **Masking:** Applies `mstatus.MIE` and the per-source `mie` enables.
//! 2. **Mapping:** Converts the highest-priority pending bit into a [`Trap`].

use crate::common::error::Trap;
use crate::core::arch::csr;

/// Trap handler utility functions.
#[derive(Debug)]
pub struct TrapHandler;

impl TrapHandler {
    /// Returns the interrupt to take, if any.
    ///
    /// # Arguments
    ///
    /// * `mstatus` - Current (forwarded) `mstatus`.
    /// * `mie` - Current (forwarded) `mie`.
    /// * `mip` - Live pending bits.
    ///
    /// # Returns
    ///
    /// `Some(Trap::MachineTimerInterrupt)` when the timer is pending and enabled
    /// both globally and locally, otherwise `None`.
    pub const fn pending_interrupt(mstatus: u32, mie: u32, mip: u32) -> Option<Trap> {
        if mstatus & csr::MSTATUS_MIE == 0 {
            return None;
        }
        if mie & mip & csr::MIP_MTIP != 0 {
            Some(Trap::MachineTimerInterrupt)
        } else {
            None
        }
    }
}
