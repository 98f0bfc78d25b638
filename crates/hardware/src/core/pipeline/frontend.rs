//! Frontend: Instruction Fetch.
//!
//! The Frontend owns the program counter, the IF/ID latch and the branch
//! predictor. Each cycle it performs the following:
//! 1. **Request:** presents `pc` to the L1 instruction cache.
//! 2. **Predict:** reads the predictor combinationally for `pc`.
//! 3. **Capture:** when the fetch is granted, forms the next IF/ID entry and the
//!    predicted next PC. The backend decides on the clock edge whether the
//!    capture is taken, held or discarded.

use crate::common::bus::{BusRequest, BusResponse};
use crate::config::Config;
use crate::core::pipeline::latches::IfIdEntry;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::bru::{BranchPredictor, BranchPredictorWrapper};

/// Result of the fetch stage for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchResult {
    /// The instruction memory answered this cycle (`instruction_grant`).
    pub granted: bool,
    /// The entry IF/ID takes when the pipeline advances.
    pub entry: IfIdEntry,
    /// Predicted PC following `entry.pc`.
    pub next_pc: u32,
}

/// Instruction fetch unit.
#[derive(Debug)]
pub struct Frontend {
    pc: u32,
    /// IF/ID pipeline latch.
    pub if_id: IfIdEntry,
    predictor: BranchPredictorWrapper,
}

impl Frontend {
    /// Creates a frontend that starts fetching at `config.general.start_pc`.
    pub fn new(config: &Config) -> Self {
        Self {
            pc: config.general.start_pc,
            if_id: IfIdEntry::default(),
            predictor: BranchPredictorWrapper::new(config),
        }
    }

    /// Current fetch PC.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Instruction-side bus request for this cycle.
    pub const fn request(&self) -> BusRequest {
        BusRequest::read(self.pc)
    }

    /// Evaluates the fetch stage against this cycle's instruction response.
    pub fn fetch(&self, response: BusResponse) -> FetchResult {
        let pred = self.predictor.predict(self.pc);
        FetchResult {
            granted: response.ready,
            entry: IfIdEntry {
                valid: response.ready,
                pc: self.pc,
                inst: response.rdata,
                pred,
            },
            next_pc: pred.next_pc(self.pc),
        }
    }

    /// Clock edge: latches a granted fetch and follows the prediction.
    pub const fn advance(&mut self, fetched: &FetchResult) {
        self.if_id = fetched.entry;
        self.pc = fetched.next_pc;
    }

    /// Clock edge: discards the fetched path and restarts at `target`.
    pub fn redirect(&mut self, target: u32) {
        tracing::trace!(target = format_args!("{target:#010x}"), "fetch redirect");
        self.if_id.flush();
        self.pc = target;
    }

    /// Trains the predictor with a resolved branch or jump.
    pub fn train(&mut self, pc: u32, taken: bool, target: u32) {
        self.predictor.update(pc, taken, target);
    }

    /// Read access to the predictor.
    pub const fn predictor(&self) -> &BranchPredictorWrapper {
        &self.predictor
    }
}
