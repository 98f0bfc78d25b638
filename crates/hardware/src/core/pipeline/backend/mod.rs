//! Backend: Decode, Execute, Memory and Writeback.
//!
//! The backend owns the ID/EX, EX/MEM and MEM/WB latches and the MDU. Each
//! cycle is evaluated in two passes:
//! 1. **Evaluate:** every stage computes its output from the current latches
//!    ([`Backend::evaluate`]), with no state changed.
//! 2. **Clock:** the outputs are committed together ([`Backend::clock`])
//!    according to the stall and flush priorities:
//!    - data bus busy: everything holds (the MDU keeps counting);
//!    - redirect from Execute: IF/ID and ID/EX are flushed;
//!    - MDU busy: Execute holds and EX/MEM takes a bubble;
//!    - load-use hazard or fetch not granted: ID/EX takes a bubble, IF/ID and PC hold;
//!    - otherwise every latch advances.

/// Instruction decode and register read.
pub mod decode;

/// Execution, interrupt sampling and control resolution.
pub mod execute;

/// Data memory access.
pub mod memory;

/// Architectural commit.
pub mod writeback;

use self::decode::decode_stage;
use self::execute::{ExecuteInputs, ExecuteOutcome, MduAction, execute_stage};
use self::memory::{MemoryOutcome, data_request, memory_stage};
use self::writeback::{WritebackPort, writeback_stage};
use crate::common::bus::{BusRequest, BusResponse};
use crate::core::arch::csr::CsrFile;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards::need_stall_load_use;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::mdu::Mdu;

/// Combinational results of one cycle.
#[derive(Clone, Copy, Debug)]
pub struct BackendCycle {
    /// Writeback commit.
    pub wb: WritebackPort,
    /// Memory stage result.
    pub mem: MemoryOutcome,
    /// Execute stage result.
    pub ex: ExecuteOutcome,
    /// Decode stage result.
    pub decoded: IdExEntry,
    /// Load-use hazard between Execute and Decode.
    pub load_use: bool,
}

/// How the pipeline moved on a clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleEvent {
    /// Data bus busy; every latch held.
    Frozen,
    /// Fetch restarts at `target`.
    Redirect {
        /// New PC.
        target: u32,
    },
    /// Execute held by the MDU.
    MduStall,
    /// Bubble inserted for a load-use hazard.
    LoadUseStall,
    /// Bubble inserted because the fetch was not granted.
    FetchStall,
    /// Every latch advanced.
    Advance,
}

/// Backend pipeline state.
#[derive(Debug)]
pub struct Backend {
    /// ID/EX pipeline latch.
    pub id_ex: IdExEntry,
    /// EX/MEM pipeline latch.
    pub ex_mem: ExMemEntry,
    /// MEM/WB pipeline latch.
    pub mem_wb: MemWbEntry,
    mdu: Mdu,
    mdu_started: bool,
}

impl Backend {
    /// Creates an empty backend whose MDU takes `mdu_latency` cycles.
    pub fn new(mdu_latency: u32) -> Self {
        Self {
            id_ex: IdExEntry::default(),
            ex_mem: ExMemEntry::default(),
            mem_wb: MemWbEntry::default(),
            mdu: Mdu::new(mdu_latency),
            mdu_started: false,
        }
    }

    /// Data-side bus request for this cycle.
    pub const fn data_request(&self) -> Option<BusRequest> {
        data_request(&self.ex_mem)
    }

    /// The multiply/divide unit.
    pub const fn mdu(&self) -> &Mdu {
        &self.mdu
    }

    /// Pass 1: evaluates every stage from the current latches.
    ///
    /// # Arguments
    ///
    /// * `if_id` - The IF/ID latch owned by the frontend.
    /// * `regs` - Register file (read in Decode).
    /// * `csrs` - Committed CSR state (read in Execute).
    /// * `data` - This cycle's L1 data cache response.
    /// * `timer_irq` - Live timer interrupt request.
    pub fn evaluate(
        &self,
        if_id: &IfIdEntry,
        regs: &Gpr,
        csrs: &CsrFile,
        data: BusResponse,
        timer_irq: bool,
    ) -> BackendCycle {
        let wb = writeback_stage(&self.mem_wb);
        let mem = memory_stage(&self.ex_mem, data);
        let ex = execute_stage(&ExecuteInputs {
            id_ex: &self.id_ex,
            ex_mem: &self.ex_mem,
            mem_wb: &self.mem_wb,
            csrs,
            timer_irq,
            mdu: &self.mdu,
            mdu_started: self.mdu_started,
        });
        BackendCycle {
            wb,
            mem,
            ex,
            decoded: decode_stage(if_id, regs, wb.reg),
            load_use: need_stall_load_use(&self.id_ex, if_id),
        }
    }

    /// Pass 2: commits the backend latches on the clock edge.
    ///
    /// Writeback's architectural effects are applied by the caller from
    /// `cycle.wb`; this only sequences the latches and the MDU.
    ///
    /// # Arguments
    ///
    /// * `cycle` - The result of [`evaluate`](Self::evaluate) for this cycle.
    /// * `fetch_granted` - The instruction fetch completed this cycle.
    pub fn clock(&mut self, cycle: &BackendCycle, fetch_granted: bool) -> CycleEvent {
        if cycle.mem.busy {
            self.mem_wb.retired = self.mem_wb.valid;
            self.mdu.clock();
            return CycleEvent::Frozen;
        }

        self.mem_wb = cycle.mem.entry;

        match cycle.ex.mdu {
            MduAction::Start(op, a, b) => {
                self.mdu.start(op, a, b);
                self.mdu_started = true;
            }
            MduAction::Complete => {
                self.mdu_started = false;
                self.mdu.clock();
            }
            MduAction::Wait | MduAction::None => self.mdu.clock(),
        }

        if let Some(target) = cycle.ex.redirect {
            self.ex_mem = cycle.ex.entry;
            self.id_ex.flush();
            return CycleEvent::Redirect { target };
        }
        if cycle.ex.mdu_stall() {
            self.ex_mem.flush();
            return CycleEvent::MduStall;
        }

        self.ex_mem = cycle.ex.entry;
        if cycle.load_use {
            self.id_ex.flush();
            CycleEvent::LoadUseStall
        } else if !fetch_granted {
            self.id_ex.flush();
            CycleEvent::FetchStall
        } else {
            self.id_ex = cycle.decoded;
            CycleEvent::Advance
        }
    }
}
