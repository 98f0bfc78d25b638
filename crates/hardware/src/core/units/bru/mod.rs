//! Branch Resolution Unit (BRU).
//!
//! This module contains the combinational branch comparator used in Execute
//! and the branch prediction schemes read by Fetch:
//! 1. **Branch Unit:** evaluates the six conditional branch conditions.
//! 2. **Bimodal:** 2-bit saturating-counter BHT plus BTB.
//! 3. **Static:** always not taken.

pub use self::branch_predictor::{BranchPredictor, Prediction};

/// 2-bit counter branch history table with target buffer.
pub mod bimodal;

/// Branch predictor trait and prediction type.
pub mod branch_predictor;

/// Branch Target Buffer for storing predicted branch targets.
pub mod btb;

/// Static branch predictor (always not-taken).
pub mod static_bp;

use self::{bimodal::BimodalPredictor, static_bp::StaticPredictor};
use crate::config::{BranchPredictor as BpType, Config};
use crate::isa::rv32i::funct3;

/// Combinational branch condition evaluator.
#[derive(Debug)]
pub struct BranchUnit;

impl BranchUnit {
    /// Evaluates a conditional branch.
    ///
    /// # Arguments
    ///
    /// * `funct3` - Branch condition (BEQ, BNE, BLT, BGE, BLTU, BGEU).
    /// * `a` - Forwarded rs1 value.
    /// * `b` - Forwarded rs2 value.
    ///
    /// # Returns
    ///
    /// `true` if the branch is taken. Reserved conditions are never taken.
    pub const fn evaluate(funct3: u32, a: u32, b: u32) -> bool {
        match funct3 {
            funct3::BEQ => a == b,
            funct3::BNE => a != b,
            funct3::BLT => (a as i32) < (b as i32),
            funct3::BGE => (a as i32) >= (b as i32),
            funct3::BLTU => a < b,
            funct3::BGEU => a >= b,
            _ => false,
        }
    }
}

/// Enum wrapper for static dispatch of Branch Predictors.
#[derive(Debug)]
pub enum BranchPredictorWrapper {
    /// Bimodal BHT + BTB.
    Bimodal(BimodalPredictor),
    /// Always not taken.
    Static(StaticPredictor),
}

impl BranchPredictorWrapper {
    /// Creates the predictor selected by `config.pipeline.branch_predictor`.
    pub fn new(config: &Config) -> Self {
        match config.pipeline.branch_predictor {
            BpType::Bimodal => Self::Bimodal(BimodalPredictor::new(config.pipeline.bht_entries)),
            BpType::Static => Self::Static(StaticPredictor),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict(&self, pc: u32) -> Prediction {
        match self {
            Self::Bimodal(bp) => bp.predict(pc),
            Self::Static(bp) => bp.predict(pc),
        }
    }

    #[inline(always)]
    fn update(&mut self, pc: u32, taken: bool, target: u32) {
        match self {
            Self::Bimodal(bp) => bp.update(pc, taken, target),
            Self::Static(bp) => bp.update(pc, taken, target),
        }
    }
}
