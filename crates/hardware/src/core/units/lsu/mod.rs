//! Load/Store Unit (LSU).
//!
//! Pure combinational lane steering between the 32-bit data bus and the
//! register file. It performs:
//! 1. **Store Alignment:** replicates a byte or halfword into every lane and
//!    computes the byte-enable from `addr & 0x3`.
//! 2. **Load Extraction:** selects the addressed lane of the bus word and
//!    sign- or zero-extends it.
//!
//! The address is never modified. Accesses that cross a word boundary are not
//! split; only the lanes inside the addressed word are touched.

use crate::common::bus::BE_WORD;
use crate::isa::rv32i::funct3;

/// A store presented on the data bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreLanes {
    /// Data replicated across the lanes.
    pub wdata: u32,
    /// Active byte lanes (bit `i` enables byte `i`).
    pub byte_enable: u8,
}

/// Load/Store Unit.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Computes bus data and byte-enable for a store.
    ///
    /// # Arguments
    ///
    /// * `addr` - Effective address; only bits 1:0 are used here.
    /// * `f3` - Store width (SB, SH, SW).
    /// * `data` - Forwarded rs2 value.
    pub const fn store_lanes(addr: u32, f3: u32, data: u32) -> StoreLanes {
        let offset = addr & 0x3;
        match f3 & 0x3 {
            funct3::SB => {
                let byte = data & 0xFF;
                StoreLanes {
                    wdata: byte * 0x0101_0101,
                    byte_enable: 1 << offset,
                }
            }
            funct3::SH => {
                let half = data & 0xFFFF;
                StoreLanes {
                    wdata: half | (half << 16),
                    byte_enable: 0b0011 << (offset & 0x2),
                }
            }
            _ => StoreLanes {
                wdata: data,
                byte_enable: BE_WORD,
            },
        }
    }

    /// Extracts and extends a load result from the bus word.
    ///
    /// # Arguments
    ///
    /// * `addr` - Effective address; bits 1:0 select the lane.
    /// * `f3` - Load width and signedness (LB, LH, LW, LBU, LHU).
    /// * `word` - The aligned bus word.
    pub const fn load_extract(addr: u32, f3: u32, word: u32) -> u32 {
        let shift = (addr & 0x3) * 8;
        match f3 {
            funct3::LB => (word >> shift) as u8 as i8 as i32 as u32,
            funct3::LBU => (word >> shift) as u8 as u32,
            funct3::LH => (word >> (shift & 16)) as u16 as i16 as i32 as u32,
            funct3::LHU => (word >> (shift & 16)) as u16 as u32,
            _ => word,
        }
    }
}
