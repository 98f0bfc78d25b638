//! Simulation driver and program loading.
//!
//! Provides the loaders that place program images into main memory and the
//! [`Simulator`] that steps the chip and exposes its debug API.

/// Flat, hex and ELF program loaders.
pub mod loader;

/// Clocked driver and debug accessors.
pub mod simulator;

pub use simulator::Simulator;
