//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Bus Transactions:** The request/ready handshake shared by caches, arbiters and devices.
//! 2. **Constants:** System-wide constants for instructions, memory and simulation.
//! 3. **Error Handling:** Trap representations and simulator-level errors.

/// Bus request/response types.
pub mod bus;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and trap definitions.
pub mod error;

pub use bus::{BusRequest, BusResponse};
pub use error::{SimError, SimResult, Trap};
