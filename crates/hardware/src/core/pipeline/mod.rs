//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage in-order pipeline.
//! It includes the following components:
//! 1. **Frontend:** Program counter, instruction fetch and branch prediction.
//! 2. **Backend:** Decode, Execute, Memory and Writeback with stall and flush control.
//! 3. **Control:** The Control Unit and ALU Control Unit decode tables.
//! 4. **Hazards:** Load-use detection and register/CSR forwarding.
//! 5. **Latches:** Inter-stage registers IF/ID, ID/EX, EX/MEM, MEM/WB.
//! 6. **Signals:** Control signals generated during instruction decoding.

/// Decode, Execute, Memory and Writeback stages.
pub mod backend;

/// Control Unit and ALU Control Unit.
pub mod control;

/// Instruction fetch and PC sequencing.
pub mod frontend;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Common latch operations.
pub mod traits;
