//! Bus transaction types.
//!
//! Every memory-side component speaks the same valid/ready handshake: the
//! requester holds a [`BusRequest`] stable every cycle until the responder
//! returns a [`BusResponse`] with `ready` set in the same cycle.

/// Byte-enable mask selecting all four lanes of a word.
pub const BE_WORD: u8 = 0b1111;

/// A single-word bus request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusRequest {
    /// Byte address. Only `addr & !3` selects the word.
    pub addr: u32,
    /// `true` for a write, `false` for a read.
    pub write: bool,
    /// Write data, already shifted into its byte lanes.
    pub wdata: u32,
    /// One bit per byte lane; ignored for reads.
    pub byte_enable: u8,
}

impl BusRequest {
    /// Creates a word read request.
    pub const fn read(addr: u32) -> Self {
        Self {
            addr,
            write: false,
            wdata: 0,
            byte_enable: BE_WORD,
        }
    }

    /// Creates a write request with explicit byte enables.
    pub const fn write(addr: u32, wdata: u32, byte_enable: u8) -> Self {
        Self {
            addr,
            write: true,
            wdata,
            byte_enable,
        }
    }

    /// Word-aligned address of this request.
    pub const fn word_addr(&self) -> u32 {
        self.addr & !3
    }
}

/// The responder's answer for the current cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusResponse {
    /// The transaction completes this cycle.
    pub ready: bool,
    /// Read data; meaningful only when `ready` is set on a read.
    pub rdata: u32,
}

impl BusResponse {
    /// The "not ready" response.
    pub const IDLE: Self = Self {
        ready: false,
        rdata: 0,
    };

    /// A completed transaction carrying `rdata`.
    pub const fn ready(rdata: u32) -> Self {
        Self { ready: true, rdata }
    }
}

/// Merges `wdata` into `old` under the byte-enable mask `be`.
pub const fn merge_bytes(old: u32, wdata: u32, be: u8) -> u32 {
    let mut mask = 0u32;
    let mut lane = 0;
    while lane < 4 {
        if be & (1 << lane) != 0 {
            mask |= 0xFF << (lane * 8);
        }
        lane += 1;
    }
    (old & !mask) | (wdata & mask)
}
