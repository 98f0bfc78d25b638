//! Shared Memory Side of the Chip.
//!
//! This module implements everything below the tiles' master ports. It provides:
//! 1. **Main Memory:** Dual-port word RAM mapped at a physical base address.
//! 2. **Subsystem:** The bus arbiter, the shared L2 and the system bus with its
//!    devices, evaluated together once per cycle.

/// Dual-port main memory.
pub mod main_memory;

/// Bus arbiter, L2 and system bus.
pub mod subsystem;

pub use main_memory::MainMemory;
pub use subsystem::{MemoryCycle, MemorySubsystem};
