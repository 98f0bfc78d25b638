//! System-on-Chip (SoC) Components.
//!
//! This module organizes everything around the CPU pipelines: the core tiles
//! with their L1 caches, the interconnect, main memory, the MMIO devices, and
//! the chip top that clocks them together.

/// Chip top: N tiles and the shared memory subsystem.
pub mod chip;

/// Memory-mapped I/O device implementations.
pub mod devices;

/// System bus and arbiters.
pub mod interconnect;

/// Main memory and the shared memory subsystem.
pub mod memory;

/// Core tile: CPU, L1 caches and L1 arbiter.
pub mod tile;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use chip::ChipTop;
pub use tile::CoreTile;
