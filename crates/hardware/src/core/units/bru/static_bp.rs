//! Static Branch Predictor.
//!
//! Implements an "Always Not Taken" policy: Fetch always follows `pc + 4`
//! and every taken branch or jump is corrected in Execute.

use super::{BranchPredictor, Prediction};

/// Static Branch Predictor structure.
#[derive(Debug, Default)]
pub struct StaticPredictor;

impl BranchPredictor for StaticPredictor {
    fn predict(&self, _pc: u32) -> Prediction {
        Prediction::NOT_TAKEN
    }

    fn update(&mut self, _pc: u32, _taken: bool, _target: u32) {}
}
