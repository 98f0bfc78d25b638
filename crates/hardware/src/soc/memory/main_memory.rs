//! Main Memory.
//!
//! Word-organised RAM with two ports:
//! 1. **Port A:** read-only, combinational. Used by the debug API to inspect
//!    memory without disturbing bus timing.
//! 2. **Port B:** the system-bus port. Reads are combinational; byte-enabled
//!    writes are committed on the clock edge through [`Device::write_word`].
//!
//! Backdoor loading writes program images directly into storage before reset.

use crate::common::bus::merge_bytes;
use crate::common::constants::WORD_BYTES;
use crate::common::error::{SimError, SimResult};
use crate::soc::devices::Device;

/// Main memory device.
#[derive(Debug)]
pub struct MainMemory {
    /// The base physical address where this memory is mapped.
    base_addr: u32,
    /// Storage, one entry per 32-bit word.
    words: Vec<u32>,
}

impl MainMemory {
    /// Creates a zero-filled memory of `size` bytes (rounded up to whole words).
    ///
    /// # Arguments
    ///
    /// * `base_addr` - Starting physical address.
    /// * `size` - Capacity in bytes.
    pub fn new(base_addr: u32, size: usize) -> Self {
        Self {
            base_addr,
            words: vec![0; size.div_ceil(WORD_BYTES as usize)],
        }
    }

    /// Capacity in bytes.
    pub fn size(&self) -> usize {
        self.words.len() * WORD_BYTES as usize
    }

    fn index(&self, addr: u32) -> Option<usize> {
        let offset = addr.checked_sub(self.base_addr)?;
        let idx = (offset >> 2) as usize;
        (idx < self.words.len()).then_some(idx)
    }

    /// Port A: reads the word containing `addr`, or `None` outside RAM.
    pub fn read_a(&self, addr: u32) -> Option<u32> {
        self.index(addr).map(|idx| self.words[idx])
    }

    /// Backdoor write of one word, bypassing the bus.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ImageTooLarge`] if `addr` is outside RAM.
    pub fn poke(&mut self, addr: u32, value: u32) -> SimResult<()> {
        let idx = self.index(addr).ok_or(SimError::ImageTooLarge {
            base: addr,
            len: WORD_BYTES as usize,
            capacity: self.size(),
        })?;
        self.words[idx] = value;
        Ok(())
    }

    /// Loads a byte slice into memory at a physical address.
    ///
    /// Bytes are stored little-endian at any byte offset; bytes of a partially
    /// covered word outside the image keep their previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ImageTooLarge`] if the image does not fit.
    pub fn load(&mut self, addr: u32, data: &[u8]) -> SimResult<()> {
        let capacity = self.size();
        let offset = addr
            .checked_sub(self.base_addr)
            .map(|o| o as usize)
            .filter(|o| o.checked_add(data.len()).is_some_and(|end| end <= capacity))
            .ok_or(SimError::ImageTooLarge {
                base: addr,
                len: data.len(),
                capacity,
            })?;
        let word_bytes = WORD_BYTES as usize;
        for (i, &byte) in data.iter().enumerate() {
            let at = offset + i;
            let lane = at % word_bytes;
            let word = &mut self.words[at / word_bytes];
            *word = merge_bytes(*word, u32::from(byte) << (lane * 8), 1 << lane);
        }
        Ok(())
    }

    /// Loads whole words starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ImageTooLarge`] if the words do not fit.
    pub fn load_words(&mut self, addr: u32, words: &[u32]) -> SimResult<()> {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.load(addr, &bytes)
    }
}

impl Device for MainMemory {
    fn name(&self) -> &str {
        "RAM"
    }

    fn address_range(&self) -> (u32, u64) {
        (self.base_addr, self.size() as u64)
    }

    fn read_word(&self, offset: u32) -> u32 {
        self.words.get((offset >> 2) as usize).copied().unwrap_or(0)
    }

    fn write_word(&mut self, offset: u32, wdata: u32, byte_enable: u8) {
        if let Some(word) = self.words.get_mut((offset >> 2) as usize) {
            *word = merge_bytes(*word, wdata, byte_enable);
        }
    }

    fn as_memory(&self) -> Option<&MainMemory> {
        Some(self)
    }

    fn as_memory_mut(&mut self) -> Option<&mut MainMemory> {
        Some(self)
    }
}
