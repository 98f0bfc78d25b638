//! Cycle-accurate RV32IM pipeline and memory-hierarchy simulator.
//!
//! This crate models a five-stage in-order RISC-V core and the chip around it:
//! 1. **Core:** Frontend (PC, IF/ID, branch predictor) and Backend (decode, execute,
//!    memory, writeback) with forwarding, load-use and MDU stalls, and machine-mode traps.
//! 2. **Units:** ALU, branch unit, multi-cycle multiply/divide unit, load/store lanes
//!    and direct-mapped write-through caches.
//! 3. **ISA:** Decoding, immediates and disassembly for RV32I/M and the system subset.
//! 4. **SoC:** Core tiles with L1 caches and arbiters, the shared L2, main memory, UART and timer.
//! 5. **Simulation:** Program loaders, the clocked driver with its debug API, and statistics.
//!
//! ```
//! use rvpipe_core::{Config, Simulator};
//!
//! let mut sim = Simulator::new(Config::default());
//! // addi x1, x0, 42 ; ebreak
//! sim.load_words(0, &[0x02a0_0093, 0x0010_0073]).unwrap();
//! let _cycles = sim.run_until_ebreak(1_000).unwrap();
//! assert_eq!(sim.reg(0, 1).unwrap(), 42);
//! ```

/// Common types and constants (bus transactions, traps, errors).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (architectural state, pipeline, execution units).
pub mod core;
/// Instruction set (decode, instruction fields, ABI names, RV32I/M, privileged).
pub mod isa;
/// Program loaders and the simulation driver.
pub mod sim;
/// System-on-chip (tiles, interconnect, memory, devices, chip top).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or parse JSON with `Config::from_json`.
pub use crate::config::Config;
/// Main CPU type; holds the pipeline, register and CSR files, and stats.
pub use crate::core::Cpu;
/// Clocked simulation driver with the debug API.
pub use crate::sim::Simulator;
/// Top-level chip (tiles and memory subsystem); construct with `ChipTop::new`.
pub use crate::soc::ChipTop;
