//! Pipeline Latch Interface.
//!
//! Common operations on the four pipeline registers: flushing to a bubble and
//! asking whether an instruction is present.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};

/// Represents a pipeline latch (inter-stage register).
pub trait PipelineLatch: Default {
    /// Replaces the contents with a bubble.
    ///
    /// Called on the edge following a mispredict, trap or MRET for every
    /// latch younger than the redirecting instruction.
    fn flush(&mut self) {
        *self = Self::default();
    }

    /// Checks if the latch holds no instruction.
    fn is_bubble(&self) -> bool;
}

impl PipelineLatch for IfIdEntry {
    fn is_bubble(&self) -> bool {
        !self.valid
    }
}

impl PipelineLatch for IdExEntry {
    fn is_bubble(&self) -> bool {
        !self.valid
    }
}

impl PipelineLatch for ExMemEntry {
    fn is_bubble(&self) -> bool {
        !self.valid
    }
}

impl PipelineLatch for MemWbEntry {
    fn is_bubble(&self) -> bool {
        !self.valid
    }
}
