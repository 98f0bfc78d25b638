//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for one hart of the simulated chip. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump, MDU, CSR, system).
//! 3. **Branch prediction:** Resolved control transfers, mispredictions, and accuracy.
//! 4. **Stalls:** Memory freeze, fetch, load-use, and MDU stall cycles; flushes and traps.
//! 5. **Cache hierarchy:** Hit/miss counts for L1-I, L1-D and the shared L2.
//!
//! Statistics serialise to JSON through [`SimStats::to_json`].

use std::time::Instant;

use serde::Serialize;

use crate::common::error::SimResult;
use crate::core::units::cache::CacheStats;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired) at Writeback.
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of JAL/JALR retired.
    pub inst_jump: u64,
    /// Count of ALU (register and immediate arithmetic, LUI, AUIPC) retired.
    pub inst_alu: u64,
    /// Count of multiply/divide instructions retired.
    pub inst_mdu: u64,
    /// Count of CSR access instructions retired.
    pub inst_csr: u64,
    /// Count of other system instructions (EBREAK, WFI, MRET, FENCE) retired.
    pub inst_system: u64,

    /// Number of resolved branches and jumps whose prediction was correct.
    pub branch_predictions: u64,
    /// Number of fetch redirects caused by a wrong prediction.
    pub branch_mispredictions: u64,

    /// Cycles the whole pipeline was frozen waiting for the data bus.
    pub stalls_mem: u64,
    /// Cycles a bubble entered Execute because the fetch was not granted.
    pub stalls_fetch: u64,
    /// Cycles a bubble entered Execute because of a load-use hazard.
    pub stalls_load_use: u64,
    /// Cycles Execute was held by a busy MDU.
    pub stalls_mdu: u64,
    /// Pipeline flushes (mispredict, trap, MRET).
    pub flushes: u64,

    /// Number of synchronous exceptions taken.
    pub traps_taken: u64,
    /// Number of interrupts taken.
    pub interrupts_taken: u64,

    /// L1 instruction cache counters.
    pub l1_i: CacheStats,
    /// L1 data cache counters.
    pub l1_d: CacheStats,
    /// Shared L2 counters (chip-wide).
    pub l2: CacheStats,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            inst_alu: 0,
            inst_mdu: 0,
            inst_csr: 0,
            inst_system: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            stalls_mem: 0,
            stalls_fetch: 0,
            stalls_load_use: 0,
            stalls_mdu: 0,
            flushes: 0,
            traps_taken: 0,
            interrupts_taken: 0,
            l1_i: CacheStats::default(),
            l1_d: CacheStats::default(),
            l2: CacheStats::default(),
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"instruction_mix"`, `"branch"`, `"memory"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "branch", "memory"];

impl SimStats {
    /// Instructions per cycle; `0.0` before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Serialises the counters as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Config`] if serialisation fails.
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        if want("summary") {
            println!("\n==========================================================");
            println!("RV32IM PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", cyc / instr);
            println!("----------------------------------------------------------");
        }
        if want("core") {
            println!("CORE BREAKDOWN");
            for (name, n) in [
                ("stalls.memory  ", self.stalls_mem),
                ("stalls.fetch   ", self.stalls_fetch),
                ("stalls.load_use", self.stalls_load_use),
                ("stalls.mdu     ", self.stalls_mdu),
            ] {
                println!("  {name}        {n} ({:.2}%)", pct(n, cyc));
            }
            println!("  flushes                {}", self.flushes);
            println!("  traps                  {}", self.traps_taken);
            println!("  interrupts             {}", self.interrupts_taken);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, n) in [
                ("op.alu   ", self.inst_alu),
                ("op.load  ", self.inst_load),
                ("op.store ", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.jump  ", self.inst_jump),
                ("op.mdu   ", self.inst_mdu),
                ("op.csr   ", self.inst_csr),
                ("op.system", self.inst_system),
            ] {
                println!("  {name}              {n} ({:.2}%)", pct(n, instr));
            }
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            let bp_total = self.branch_predictions + self.branch_mispredictions;
            let bp_acc = if bp_total > 0 {
                pct(self.branch_predictions, bp_total as f64)
            } else {
                0.0
            };
            println!("BRANCH PREDICTION");
            println!("  bp.lookups             {bp_total}");
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!("  bp.accuracy            {bp_acc:.2}%");
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            let print_cache = |name: &str, c: &CacheStats| {
                let total = c.hits + c.misses;
                let miss_rate = if total > 0 {
                    pct(c.misses, total as f64)
                } else {
                    0.0
                };
                println!(
                    "  {:<6} accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}% | forwarded: {}",
                    name, total, c.hits, miss_rate, c.forwarded
                );
            };
            println!("MEMORY HIERARCHY");
            print_cache("L1-I", &self.l1_i);
            print_cache("L1-D", &self.l1_d);
            print_cache("L2", &self.l2);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
