//! Direct-Mapped Cache.
//!
//! One cache model serves as L1-I, L1-D and the shared L2. Each level sits
//! between an upstream requester and a downstream port and follows the bus
//! handshake of [`crate::common::bus`]. The controller is a small state machine:
//! 1. **Idle:** a cacheable read that hits is answered in the same cycle. A
//!    miss moves to `Refill` on the next edge; a write or an uncacheable access
//!    moves to `Forward`.
//! 2. **Refill:** issues `LINE_WORDS` sequential word reads at increasing
//!    addresses, storing each beat as it completes. After the last beat the tag
//!    and valid bit are set and the controller returns to `Idle`, where the
//!    held request now hits.
//! 3. **Forward:** passes one transaction downstream and answers upstream in
//!    the cycle the downstream level is ready. Writes are write-through and
//!    no-write-allocate; a write that hits also updates the resident line.
//!
//! Only the cacheable window (main RAM) is ever allocated; device registers
//! always travel as forwarded single beats.

use serde::Serialize;

use crate::common::bus::{BusRequest, BusResponse, merge_bytes};
use crate::common::constants::{LINE_BYTES, LINE_WORDS, WORD_BYTES};
use crate::config::CacheConfig;

/// Cache line: tag, valid bit and four data words.
#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    tag: u32,
    valid: bool,
    data: [u32; LINE_WORDS],
}

/// Controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheState {
    /// Serving hits; no downstream transaction.
    #[default]
    Idle,
    /// Filling the line at `base`; `beat` words are already stored.
    Refill {
        /// Line-aligned base address.
        base: u32,
        /// Index of the word currently requested.
        beat: usize,
    },
    /// Passing a single transaction downstream.
    Forward(BusRequest),
}

/// Per-cache access counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Cacheable reads answered from a valid line.
    pub hits: u64,
    /// Cacheable reads that started a refill.
    pub misses: u64,
    /// Writes and uncacheable accesses forwarded downstream.
    pub forwarded: u64,
}

/// Address window eligible for allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cacheable {
    /// First cacheable byte.
    pub base: u32,
    /// Window size in bytes.
    pub size: u64,
}

impl Cacheable {
    /// `true` if `addr` lies inside the window.
    pub fn contains(&self, addr: u32) -> bool {
        u64::from(addr.wrapping_sub(self.base)) < self.size
    }
}

/// Direct-mapped, write-through cache controller.
#[derive(Debug)]
pub struct Cache {
    name: &'static str,
    enabled: bool,
    lines: Vec<CacheLine>,
    index_mask: u32,
    cacheable: Cacheable,
    state: CacheState,
    /// Access counters.
    pub stats: CacheStats,
}

impl Cache {
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in log events (`"l1i"`, `"l1d"`, `"l2"`).
    /// * `config` - Enable flag and line count (rounded up to a power of two).
    /// * `cacheable` - Address window that may be allocated.
    pub fn new(name: &'static str, config: &CacheConfig, cacheable: Cacheable) -> Self {
        let lines = config.lines.max(1).next_power_of_two();
        Self {
            name,
            enabled: config.enabled,
            lines: vec![CacheLine::default(); lines],
            index_mask: (lines - 1) as u32,
            cacheable,
            state: CacheState::Idle,
            stats: CacheStats::default(),
        }
    }

    const fn line_number(addr: u32) -> u32 {
        addr / LINE_BYTES
    }

    const fn word_offset(addr: u32) -> usize {
        ((addr % LINE_BYTES) / WORD_BYTES) as usize
    }

    fn slot(&self, addr: u32) -> usize {
        (Self::line_number(addr) & self.index_mask) as usize
    }

    /// Returns the cached word at `addr` if its line is resident.
    pub fn lookup(&self, addr: u32) -> Option<u32> {
        let line = &self.lines[self.slot(addr)];
        (line.valid && line.tag == Self::line_number(addr))
            .then(|| line.data[Self::word_offset(addr)])
    }

    fn is_allocating_read(&self, req: &BusRequest) -> bool {
        !req.write && self.cacheable.contains(req.addr)
    }

    /// Current controller state.
    pub const fn state(&self) -> CacheState {
        self.state
    }

    /// `true` when this level forwards every access unmodified.
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Downstream request for this cycle.
    pub fn request(&self, upstream: Option<&BusRequest>) -> Option<BusRequest> {
        if !self.enabled {
            return upstream.copied();
        }
        match self.state {
            CacheState::Idle => None,
            CacheState::Refill { base, beat } => {
                Some(BusRequest::read(base + (beat as u32) * WORD_BYTES))
            }
            CacheState::Forward(req) => Some(req),
        }
    }

    /// Upstream response for this cycle.
    pub fn respond(&self, upstream: Option<&BusRequest>, downstream: BusResponse) -> BusResponse {
        let Some(req) = upstream else {
            return BusResponse::IDLE;
        };
        if !self.enabled {
            return downstream;
        }
        match self.state {
            CacheState::Idle if self.is_allocating_read(req) => self
                .lookup(req.addr)
                .map_or(BusResponse::IDLE, BusResponse::ready),
            CacheState::Forward(latched) if latched == *req && downstream.ready => {
                BusResponse::ready(downstream.rdata)
            }
            _ => BusResponse::IDLE,
        }
    }

    /// Clock edge.
    ///
    /// `upstream` and `downstream` must be the same values used for
    /// [`request`](Self::request) and [`respond`](Self::respond) this cycle.
    pub fn clock(&mut self, upstream: Option<&BusRequest>, downstream: BusResponse) {
        if !self.enabled {
            return;
        }
        match self.state {
            CacheState::Idle => {
                let Some(req) = upstream else { return };
                if !self.is_allocating_read(req) {
                    self.stats.forwarded += 1;
                    self.state = CacheState::Forward(*req);
                } else if self.lookup(req.addr).is_some() {
                    self.stats.hits += 1;
                } else {
                    self.stats.misses += 1;
                    let base = req.addr & !(LINE_BYTES - 1);
                    let slot = self.slot(base);
                    self.lines[slot].valid = false;
                    tracing::debug!(
                        cache = self.name,
                        base = format_args!("{base:#010x}"),
                        "refill"
                    );
                    self.state = CacheState::Refill { base, beat: 0 };
                }
            }
            CacheState::Refill { base, beat } => {
                if !downstream.ready {
                    return;
                }
                let slot = self.slot(base);
                let line = &mut self.lines[slot];
                line.data[beat] = downstream.rdata;
                if beat + 1 == LINE_WORDS {
                    line.tag = Self::line_number(base);
                    line.valid = true;
                    self.state = CacheState::Idle;
                } else {
                    self.state = CacheState::Refill {
                        base,
                        beat: beat + 1,
                    };
                }
            }
            CacheState::Forward(req) => {
                if !downstream.ready {
                    return;
                }
                if req.write && self.lookup(req.addr).is_some() {
                    let slot = self.slot(req.addr);
                    let word = &mut self.lines[slot].data[Self::word_offset(req.addr)];
                    *word = merge_bytes(*word, req.wdata, req.byte_enable);
                }
                self.state = CacheState::Idle;
            }
        }
    }

    /// Invalidates every line.
    pub fn invalidate_all(&mut self) {
        for line in &mut self.lines {
            line.valid = false;
        }
    }
}
