//! Program Loader.
//!
//! This module places programs into main memory before reset. It provides:
//! 1. **File access:** `load_binary` reads an image from disk.
//! 2. **Flat images:** Little-endian byte streams padded to whole words.
//! 3. **Hex images:** `$readmemh`-style text, one 32-bit word per line, with
//!    `//` and `#` comments and `@index` word-address markers.
//! 4. **ELF images:** 32-bit ELF executables; every `PT_LOAD` segment is copied
//!    to its physical address and the entry point is returned.

use std::fs;
use std::path::Path;

use object::read::elf::ElfFile32;
use object::{Architecture, Endianness, Object, ObjectSegment};

use crate::common::constants::WORD_BYTES;
use crate::common::error::{SimError, SimResult};
use crate::soc::memory::MainMemory;

/// Reads a program image from disk.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> SimResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Writes a flat little-endian image at `base`, zero-padding the last word.
///
/// # Errors
///
/// Returns [`SimError::ImageTooLarge`] if the image does not fit in RAM.
pub fn load_flat_image(mem: &mut MainMemory, base: u32, image: &[u8]) -> SimResult<()> {
    mem.load(base, image)?;
    tracing::info!(
        base = format_args!("{base:#010x}"),
        bytes = image.len(),
        "loaded flat image"
    );
    Ok(())
}

/// Parses a `$readmemh`-style hex image into `(byte address, word)` pairs.
///
/// Words are placed consecutively from `base`; a line `@N` moves the cursor
/// to word index `N` relative to `base`. Blank lines and text after `//` or
/// `#` are ignored.
///
/// # Errors
///
/// Returns [`SimError::InvalidHex`] for a token that is not a 32-bit hex value.
pub fn parse_hex_image(text: &str, base: u32) -> SimResult<Vec<(u32, u32)>> {
    let mut words = Vec::new();
    let mut index: u32 = 0;
    for (n, raw) in text.lines().enumerate() {
        let line = raw
            .split("//")
            .next()
            .and_then(|l| l.split('#').next())
            .unwrap_or_default();
        for token in line.split_whitespace() {
            let invalid = || SimError::InvalidHex {
                line: n + 1,
                text: token.to_owned(),
            };
            if let Some(addr) = token.strip_prefix('@') {
                index = u32::from_str_radix(addr, 16).map_err(|_| invalid())?;
                continue;
            }
            let word = u32::from_str_radix(&token.replace('_', ""), 16).map_err(|_| invalid())?;
            words.push((base.wrapping_add(index.wrapping_mul(WORD_BYTES)), word));
            index = index.wrapping_add(1);
        }
    }
    Ok(words)
}

/// Parses a hex image and writes its words into memory.
///
/// # Errors
///
/// Returns [`SimError::InvalidHex`] for malformed text and
/// [`SimError::ImageTooLarge`] for a word outside RAM.
pub fn load_hex_image(mem: &mut MainMemory, base: u32, text: &str) -> SimResult<usize> {
    let words = parse_hex_image(text, base)?;
    for &(addr, word) in &words {
        mem.poke(addr, word)?;
    }
    tracing::info!(
        base = format_args!("{base:#010x}"),
        words = words.len(),
        "loaded hex image"
    );
    Ok(words.len())
}

/// Loads an ELF32 executable and returns its entry point.
///
/// # Errors
///
/// Returns [`SimError::Elf`] if the image is not a valid ELF32 file and
/// [`SimError::ImageTooLarge`] if a segment falls outside RAM.
pub fn load_elf(mem: &mut MainMemory, image: &[u8]) -> SimResult<u32> {
    let elf = ElfFile32::<Endianness>::parse(image)?;
    if elf.architecture() != Architecture::Riscv32 {
        tracing::warn!(arch = ?elf.architecture(), "ELF image is not RISC-V 32-bit");
    }
    for segment in elf.segments() {
        let data = segment.data()?;
        if data.is_empty() {
            continue;
        }
        let addr = segment.address() as u32;
        mem.load(addr, data)?;
        tracing::debug!(
            addr = format_args!("{addr:#010x}"),
            bytes = data.len(),
            "loaded ELF segment"
        );
    }
    let entry = elf.entry() as u32;
    tracing::info!(entry = format_args!("{entry:#010x}"), "loaded ELF image");
    Ok(entry)
}
