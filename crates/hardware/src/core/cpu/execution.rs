//! Main Execution Cycle.
//!
//! This module implements one clock cycle of the CPU. It performs the following:
//! 1. **Evaluate:** Fetch and every backend stage compute their outputs from the
//!    current latches and this cycle's bus responses.
//! 2. **Commit:** Writeback updates the register and CSR files, then the latches,
//!    the PC and the predictor advance according to the stall/flush decision.
//! 3. **Accounting:** Stall, flush and prediction statistics.

use super::Cpu;
use crate::common::bus::BusResponse;
use crate::core::pipeline::backend::CycleEvent;

impl Cpu {
    /// Advances the CPU by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `fetch` - The L1 instruction cache's answer to [`Cpu::fetch_request`].
    /// * `data` - The L1 data cache's answer to [`Cpu::data_request`].
    /// * `timer_irq` - Level of the timer interrupt line.
    ///
    /// # Returns
    ///
    /// How the pipeline moved on this edge.
    pub fn clock(&mut self, fetch: BusResponse, data: BusResponse, timer_irq: bool) -> CycleEvent {
        self.stats.cycles += 1;

        let fetched = self.frontend.fetch(fetch);
        let cycle = self.backend.evaluate(
            &self.frontend.if_id,
            &self.regs,
            &self.csrs,
            data,
            timer_irq,
        );

        self.commit_writeback(&cycle.wb);

        let event = self.backend.clock(&cycle, fetched.granted);
        match event {
            CycleEvent::Frozen => self.stats.stalls_mem += 1,
            CycleEvent::Redirect { target } => {
                self.stats.flushes += 1;
                self.frontend.redirect(target);
            }
            CycleEvent::MduStall => self.stats.stalls_mdu += 1,
            CycleEvent::LoadUseStall => self.stats.stalls_load_use += 1,
            CycleEvent::FetchStall => self.stats.stalls_fetch += 1,
            CycleEvent::Advance => self.frontend.advance(&fetched),
        }

        if event != CycleEvent::Frozen {
            if let Some(br) = cycle.ex.branch {
                self.frontend.train(br.pc, br.taken, br.target);
                if br.mispredicted {
                    self.stats.branch_mispredictions += 1;
                } else {
                    self.stats.branch_predictions += 1;
                }
            }
        }

        if event != CycleEvent::Frozen && event != CycleEvent::Advance {
            tracing::trace!(
                hart = self.hart_id,
                ?event,
                pc = format_args!("{:#010x}", self.pc()),
                "pipeline"
            );
        }

        event
    }
}
