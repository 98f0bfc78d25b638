//! Simulator: owns the chip and drives its clock.
//!
//! The simulator is the harness-facing surface of the crate. It provides:
//! 1. **Loading:** Flat, hex and ELF images written into main memory before the
//!    first cycle.
//! 2. **Stepping:** Single cycles, fixed cycle counts and bounded runs that stop
//!    at a PC or at the terminal `EBREAK` marker.
//! 3. **Debug API:** Read-only views of registers, CSRs, memory words, per-stage
//!    PCs, UART output and statistics.

use crate::common::constants::DEFAULT_MAX_CYCLES;
use crate::common::error::{SimError, SimResult};
use crate::config::Config;
use crate::core::pipeline::backend::CycleEvent;
use crate::isa::privileged::opcodes::EBREAK;
use crate::sim::loader;
use crate::soc::ChipTop;
use crate::soc::memory::MainMemory;
use crate::stats::SimStats;

/// ELF magic number.
const ELF_MAGIC: &[u8] = b"\x7fELF";

/// Top-level simulator: the chip plus its configuration.
#[derive(Debug)]
pub struct Simulator {
    /// The simulated chip.
    pub chip: ChipTop,
    config: Config,
}

impl Simulator {
    /// Creates a simulator with the chip in its reset state.
    pub fn new(config: Config) -> Self {
        Self {
            chip: ChipTop::new(&config),
            config,
        }
    }

    /// The configuration the chip was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    fn memory_mut(&mut self) -> SimResult<&mut MainMemory> {
        let capacity = self.config.system.ram_size;
        self.chip
            .main_memory_mut()
            .ok_or(SimError::ImageTooLarge {
                base: self.config.system.ram_base,
                len: 0,
                capacity,
            })
    }

    /// Writes a flat image at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ImageTooLarge`] if the image does not fit in RAM.
    pub fn load_flat(&mut self, base: u32, image: &[u8]) -> SimResult<()> {
        loader::load_flat_image(self.memory_mut()?, base, image)
    }

    /// Writes instruction or data words at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ImageTooLarge`] if the words do not fit in RAM.
    pub fn load_words(&mut self, base: u32, words: &[u32]) -> SimResult<()> {
        self.memory_mut()?.load_words(base, words)
    }

    /// Writes a `$readmemh`-style image relative to the RAM base.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidHex`] or [`SimError::ImageTooLarge`].
    pub fn load_hex(&mut self, text: &str) -> SimResult<usize> {
        let base = self.config.system.ram_base;
        loader::load_hex_image(self.memory_mut()?, base, text)
    }

    /// Loads an ELF image and points every hart at its entry.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Elf`] or [`SimError::ImageTooLarge`].
    pub fn load_elf(&mut self, image: &[u8]) -> SimResult<u32> {
        let entry = loader::load_elf(self.memory_mut()?, image)?;
        self.set_pc(entry)?;
        Ok(entry)
    }

    /// Reads a program file and loads it as ELF or, failing the magic check,
    /// as a flat image at the RAM base.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, or any loader error.
    pub fn load_file(&mut self, path: &str) -> SimResult<()> {
        let image = loader::load_binary(path)?;
        if image.starts_with(ELF_MAGIC) {
            let _ = self.load_elf(&image)?;
            Ok(())
        } else {
            self.load_flat(self.config.system.ram_base, &image)
        }
    }

    /// Redirects every hart's fetch PC. Intended for use before the first cycle.
    ///
    /// # Errors
    ///
    /// Never fails for a constructed chip; kept fallible for hart lookup.
    pub fn set_pc(&mut self, pc: u32) -> SimResult<()> {
        for hart in 0..self.chip.harts() {
            self.chip.tile_mut(hart)?.cpu.frontend.redirect(pc);
        }
        Ok(())
    }

    /// Advances the chip by one clock cycle.
    pub fn tick(&mut self) -> Vec<CycleEvent> {
        self.chip.tick()
    }

    /// Advances the chip by `cycles` clock cycles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            let _ = self.chip.tick();
        }
    }

    /// Runs until hart 0 fetches `pc`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Timeout`] if `pc` is not reached within `max_cycles`.
    pub fn run_until_pc(&mut self, pc: u32, max_cycles: u64) -> SimResult<u64> {
        let start = self.chip.cycles();
        while self.chip.cycles() - start < max_cycles {
            if self.chip.tile(0)?.cpu.pc() == pc {
                return Ok(self.chip.cycles() - start);
            }
            let _ = self.chip.tick();
        }
        Err(SimError::Timeout {
            cycles: max_cycles,
            waiting_for: format!("pc {pc:#010x}"),
        })
    }

    /// Runs until hart 0 retires an `EBREAK`.
    ///
    /// The marker is first seen at the Execute-stage PC; the run continues
    /// until that instruction reaches Writeback, so every older instruction
    /// has committed when this returns. An `EBREAK` squashed before
    /// Writeback (for example by an interrupt) does not end the run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Timeout`] if no `EBREAK` retires within `max_cycles`.
    pub fn run_until_ebreak(&mut self, max_cycles: u64) -> SimResult<u64> {
        let start = self.chip.cycles();
        while self.chip.cycles() - start < max_cycles {
            let cpu = &self.chip.tile(0)?.cpu;
            let wb = &cpu.backend.mem_wb;
            let at_writeback = wb.valid && !wb.retired && wb.trap.is_none() && wb.inst == EBREAK;
            if let Some((pc, EBREAK)) = cpu.execute_stage() {
                tracing::debug!(pc = format_args!("{pc:#010x}"), "ebreak in execute");
            }
            let _ = self.chip.tick();
            if at_writeback {
                return Ok(self.chip.cycles() - start);
            }
        }
        Err(SimError::Timeout {
            cycles: max_cycles,
            waiting_for: "ebreak".to_owned(),
        })
    }

    /// Runs until `EBREAK` retires, bounded by `general.max_cycles` or
    /// [`DEFAULT_MAX_CYCLES`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Timeout`] when the bound is exceeded.
    pub fn run_to_completion(&mut self) -> SimResult<u64> {
        let bound = self.config.general.max_cycles.unwrap_or(DEFAULT_MAX_CYCLES);
        self.run_until_ebreak(bound)
    }

    /// Cycles simulated since reset.
    pub const fn cycles(&self) -> u64 {
        self.chip.cycles()
    }

    /// Architectural value of register `x{idx}` on `hart`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchHart`] for an unknown hart.
    pub fn reg(&self, hart: usize, idx: usize) -> SimResult<u32> {
        Ok(self.chip.tile(hart)?.cpu.regs.read(idx))
    }

    /// All 32 architectural registers of `hart`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchHart`] for an unknown hart.
    pub fn regs(&self, hart: usize) -> SimResult<[u32; 32]> {
        Ok(self.chip.tile(hart)?.cpu.regs.snapshot())
    }

    /// Committed value of the CSR at `addr` on `hart`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchHart`] for an unknown hart.
    pub fn csr(&self, hart: usize, addr: u32) -> SimResult<u32> {
        let timer_irq = self.chip.memory().timer_irq();
        Ok(self.chip.tile(hart)?.cpu.read_csr(addr, timer_irq))
    }

    /// Word of main memory containing `addr`, or `None` outside RAM.
    pub fn read_word(&self, addr: u32) -> Option<u32> {
        self.chip.main_memory().and_then(|mem| mem.read_a(addr))
    }

    /// Fetch PC of `hart`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchHart`] for an unknown hart.
    pub fn pc(&self, hart: usize) -> SimResult<u32> {
        Ok(self.chip.tile(hart)?.cpu.pc())
    }

    /// PCs held in IF/ID, ID/EX, EX/MEM and MEM/WB of `hart`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchHart`] for an unknown hart.
    pub fn stage_pcs(&self, hart: usize) -> SimResult<[Option<u32>; 4]> {
        Ok(self.chip.tile(hart)?.cpu.stage_pcs())
    }

    /// Bytes written to the UART so far.
    pub fn uart_output(&self) -> Vec<u8> {
        self.chip
            .memory()
            .bus()
            .uart()
            .map(|uart| uart.output().to_vec())
            .unwrap_or_default()
    }

    /// Statistics of `hart`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchHart`] for an unknown hart.
    pub fn stats(&self, hart: usize) -> SimResult<SimStats> {
        self.chip.stats(hart)
    }
}
