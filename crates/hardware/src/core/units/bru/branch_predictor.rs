//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait shared by the prediction
//! schemes. Fetch reads a [`Prediction`] combinationally; Execute trains the
//! predictor with every resolved branch or jump.

/// Fetch-time prediction for one PC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Prediction {
    /// Predicted direction.
    pub taken: bool,
    /// Predicted target; meaningful only when `taken` is set.
    pub target: u32,
}

impl Prediction {
    /// The fall-through prediction.
    pub const NOT_TAKEN: Self = Self {
        taken: false,
        target: 0,
    };

    /// Returns the PC that Fetch follows after `pc`.
    pub const fn next_pc(&self, pc: u32) -> u32 {
        if self.taken {
            self.target
        } else {
            pc.wrapping_add(crate::common::constants::INSTRUCTION_SIZE)
        }
    }
}

/// Trait for branch prediction algorithms.
pub trait BranchPredictor {
    /// Predicts the direction and target of the instruction at `pc`.
    fn predict(&self, pc: u32) -> Prediction;

    /// Trains the predictor with a resolved outcome.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch or jump
    /// * `taken` - Whether control flow was actually redirected
    /// * `target` - The resolved target address (used only when taken)
    fn update(&mut self, pc: u32, taken: bool, target: u32);
}
