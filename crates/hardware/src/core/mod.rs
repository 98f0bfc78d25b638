//! Core processor implementation.
//!
//! This module contains the main CPU implementation including the instruction
//! pipeline, execution units, architecture-specific components, and the
//! orchestrator that coordinates all components.

/// Architectural state (CSR file, register file, interrupt acceptance).
pub mod arch;

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Instruction pipeline implementation (frontend, backend, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, MDU, LSU, branch unit and predictors, caches).
pub mod units;

pub use self::cpu::Cpu;
