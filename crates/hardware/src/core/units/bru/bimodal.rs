//! Bimodal Branch Predictor.
//!
//! A Branch History Table of 2-bit saturating counters beside a [`Btb`], both
//! indexed by the same PC bits. Counters reset to Weakly-Not-Taken.
//!
//! | Counter | State              | Prediction |
//! |---------|--------------------|------------|
//! | 0       | Strongly-Not-Taken | not taken  |
//! | 1       | Weakly-Not-Taken   | not taken  |
//! | 2       | Weakly-Taken       | taken      |
//! | 3       | Strongly-Taken     | taken      |

use super::{BranchPredictor, Prediction, btb::Btb};

/// Counter value at reset.
pub const WEAKLY_NOT_TAKEN: u8 = 1;

/// Saturation limit.
pub const STRONGLY_TAKEN: u8 = 3;

/// Threshold at or above which a branch is predicted taken.
const TAKEN_THRESHOLD: u8 = 2;

/// Bimodal predictor state.
#[derive(Debug)]
pub struct BimodalPredictor {
    bht: Vec<u8>,
    btb: Btb,
}

impl BimodalPredictor {
    /// Creates a predictor with `entries` BHT/BTB entries (rounded up to a
    /// power of two).
    pub fn new(entries: usize) -> Self {
        let btb = Btb::new(entries);
        let size = entries.max(1).next_power_of_two();
        Self {
            bht: vec![WEAKLY_NOT_TAKEN; size],
            btb,
        }
    }

    /// Returns the raw counter for `pc`.
    pub fn counter(&self, pc: u32) -> u8 {
        self.bht[self.btb.index(pc)]
    }
}

impl BranchPredictor for BimodalPredictor {
    fn predict(&self, pc: u32) -> Prediction {
        if self.counter(pc) < TAKEN_THRESHOLD {
            return Prediction::NOT_TAKEN;
        }
        match self.btb.lookup(pc) {
            Some(target) => Prediction {
                taken: true,
                target,
            },
            None => Prediction::NOT_TAKEN,
        }
    }

    fn update(&mut self, pc: u32, taken: bool, target: u32) {
        let idx = self.btb.index(pc);
        let ctr = &mut self.bht[idx];
        if taken {
            *ctr = (*ctr + 1).min(STRONGLY_TAKEN);
            self.btb.update(pc, target);
        } else {
            *ctr = ctr.saturating_sub(1);
        }
    }
}
