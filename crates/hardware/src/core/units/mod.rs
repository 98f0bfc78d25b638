//! Execution units and functional components.
//!
//! This module contains the combinational execution units (ALU, branch unit,
//! load/store lane steering), the multi-cycle MDU, the branch predictors and
//! the cache controller shared by every cache level.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit including branch predictors and BTB.
pub mod bru;

/// Direct-mapped write-through cache (L1-I, L1-D, L2).
pub mod cache;

/// Load/Store Unit lane steering.
pub mod lsu;

/// Multi-cycle multiply/divide unit.
pub mod mdu;
