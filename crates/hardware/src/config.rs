//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulated chip. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory map, cache geometry, MDU latency).
//! 2. **Structures:** Hierarchical config for general, system, cache, and pipeline settings.
//! 3. **Enums:** Branch predictor selection.
//!
//! Configuration is supplied as JSON through [`Config::from_json`] or built with
//! `Config::default()`. Every field is optional in JSON and falls back to its default.

use serde::Deserialize;

use crate::common::error::SimResult;

/// Default configuration constants for the simulator.
mod defaults {
    /// Base address of main RAM. Programs are loaded here.
    pub const RAM_BASE: u32 = 0x0000_0000;

    /// Size of main RAM in bytes (64 KiB).
    pub const RAM_SIZE: usize = 64 * 1024;

    /// Byte-wide UART transmit register.
    pub const UART_BASE: u32 = 0x4000_0000;

    /// Timer block (`mtime` low/high, `mtimecmp` low/high).
    pub const TIMER_BASE: u32 = 0x4000_4000;

    /// `mtime` increments every N cycles.
    pub const TIMER_DIVIDER: u64 = 1;

    /// Number of core tiles on the chip.
    pub const HARTS: usize = 1;

    /// Lines per L1 cache (4 words each).
    pub const L1_LINES: usize = 64;

    /// Lines in the shared L2 cache (4 words each).
    pub const L2_LINES: usize = 256;

    /// Branch history table / BTB entries, indexed by `pc[7:2]`.
    pub const BHT_ENTRIES: usize = 64;

    /// Cycles between MDU start and `ready`.
    pub const MDU_LATENCY: u32 = 32;
}

/// Branch predictor implementation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// 2-bit saturating counters with a branch target buffer.
    #[default]
    Bimodal,
    /// Always predicts fall-through.
    Static,
}

/// Root configuration structure.
///
/// Aggregates all configuration sections for the simulated chip.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory map and chip composition.
    #[serde(default)]
    pub system: SystemConfig,
    /// Cache hierarchy.
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
    /// Pipeline and execution units.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::Config`] if the document is malformed.
    pub fn from_json(text: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit one `tracing` event per retired instruction (requires the
    /// `commit-log` feature).
    #[serde(default)]
    pub trace_instructions: bool,

    /// Reset value of the program counter.
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Optional default bound for `Simulator::run_until_*` helpers.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

impl GeneralConfig {
    fn default_start_pc() -> u32 {
        defaults::RAM_BASE
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::RAM_BASE,
            max_cycles: None,
        }
    }
}

/// System memory map and chip composition.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Number of core tiles sharing the L2 and main memory.
    #[serde(default = "SystemConfig::default_harts")]
    pub harts: usize,

    /// Main RAM base address
    #[serde(default = "SystemConfig::default_ram_base")]
    pub ram_base: u32,

    /// Main RAM size in bytes
    #[serde(default = "SystemConfig::default_ram_size")]
    pub ram_size: usize,

    /// UART transmit register address
    #[serde(default = "SystemConfig::default_uart_base")]
    pub uart_base: u32,

    /// Timer MMIO base address
    #[serde(default = "SystemConfig::default_timer_base")]
    pub timer_base: u32,

    /// Timer divider (mtime increments every N cycles)
    #[serde(default = "SystemConfig::default_timer_divider")]
    pub timer_divider: u64,

    /// Echo UART bytes to stdout in addition to capturing them.
    #[serde(default)]
    pub uart_echo: bool,
}

impl SystemConfig {
    fn default_harts() -> usize {
        defaults::HARTS
    }

    fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }

    fn default_uart_base() -> u32 {
        defaults::UART_BASE
    }

    fn default_timer_base() -> u32 {
        defaults::TIMER_BASE
    }

    fn default_timer_divider() -> u64 {
        defaults::TIMER_DIVIDER
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            harts: defaults::HARTS,
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            uart_base: defaults::UART_BASE,
            timer_base: defaults::TIMER_BASE,
            timer_divider: defaults::TIMER_DIVIDER,
            uart_echo: false,
        }
    }
}

/// Configuration for a single direct-mapped cache.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheConfig {
    /// When false every access is forwarded to the next level uncached.
    #[serde(default = "CacheConfig::default_enabled")]
    pub enabled: bool,
    /// Number of 4-word lines. Must be a power of two.
    pub lines: usize,
}

impl CacheConfig {
    fn default_enabled() -> bool {
        true
    }
}

/// Cache hierarchy configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheHierarchyConfig {
    /// L1 instruction cache.
    #[serde(default = "CacheHierarchyConfig::default_l1")]
    pub l1_i: CacheConfig,
    /// L1 data cache.
    #[serde(default = "CacheHierarchyConfig::default_l1")]
    pub l1_d: CacheConfig,
    /// Shared L2 cache.
    #[serde(default = "CacheHierarchyConfig::default_l2")]
    pub l2: CacheConfig,
}

impl CacheHierarchyConfig {
    const fn default_l1() -> CacheConfig {
        CacheConfig {
            enabled: true,
            lines: defaults::L1_LINES,
        }
    }

    const fn default_l2() -> CacheConfig {
        CacheConfig {
            enabled: true,
            lines: defaults::L2_LINES,
        }
    }
}

impl Default for CacheHierarchyConfig {
    fn default() -> Self {
        Self {
            l1_i: Self::default_l1(),
            l1_d: Self::default_l1(),
            l2: Self::default_l2(),
        }
    }
}

/// Pipeline and execution unit configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PipelineConfig {
    /// Branch prediction algorithm
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// Branch history table and BTB entries (power of two)
    #[serde(default = "PipelineConfig::default_bht_entries")]
    pub bht_entries: usize,

    /// Multiply/divide latency in cycles
    #[serde(default = "PipelineConfig::default_mdu_latency")]
    pub mdu_latency: u32,
}

impl PipelineConfig {
    fn default_bht_entries() -> usize {
        defaults::BHT_ENTRIES
    }

    fn default_mdu_latency() -> u32 {
        defaults::MDU_LATENCY
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            branch_predictor: BranchPredictor::default(),
            bht_entries: defaults::BHT_ENTRIES,
            mdu_latency: defaults::MDU_LATENCY,
        }
    }
}
