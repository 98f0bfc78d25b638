//! Privileged Architecture Definitions.
//!
//! Machine-mode trap causes and system opcodes. CSR addresses live with the
//! CSR file in [`crate::core::arch::csr`].
//!
//! # Modules
//!
//! - `cause`: Exception and Interrupt cause codes.
//! - `opcodes`: System instruction opcodes (ECALL, EBREAK, MRET, CSR ops).

/// Exception and interrupt cause code definitions.
pub mod cause;

/// System instruction opcodes (ECALL, EBREAK, MRET, CSR funct3).
pub mod opcodes;
