//! L1 Arbiter.
//!
//! Shares a tile's single bus master port between its L1 instruction and
//! data caches. The grant is registered: it is chosen on a clock edge from
//! the requests seen in `Idle`, with the data side winning ties, and holds
//! until the granted cache observes `ready` (or withdraws its request).
//! While granted, the arbiter is a pure pass-through.

use crate::common::bus::{BusRequest, BusResponse};

/// Arbiter state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum L1Grant {
    /// No requester owns the port.
    #[default]
    Idle,
    /// The instruction cache owns the port.
    Instruction,
    /// The data cache owns the port.
    Data,
}

/// Responses routed back to each L1 cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct L1Responses {
    /// Response for the instruction cache.
    pub inst: BusResponse,
    /// Response for the data cache.
    pub data: BusResponse,
}

/// Two-way arbiter with data priority.
#[derive(Debug, Default)]
pub struct L1Arbiter {
    grant: L1Grant,
}

impl L1Arbiter {
    /// Creates an idle arbiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current grant.
    pub const fn grant(&self) -> L1Grant {
        self.grant
    }

    /// Request forwarded to the tile's master port this cycle.
    pub fn request(
        &self,
        inst: Option<&BusRequest>,
        data: Option<&BusRequest>,
    ) -> Option<BusRequest> {
        match self.grant {
            L1Grant::Idle => None,
            L1Grant::Instruction => inst.copied(),
            L1Grant::Data => data.copied(),
        }
    }

    /// Routes the downstream response to the granted cache.
    pub const fn respond(&self, downstream: BusResponse) -> L1Responses {
        match self.grant {
            L1Grant::Idle => L1Responses {
                inst: BusResponse::IDLE,
                data: BusResponse::IDLE,
            },
            L1Grant::Instruction => L1Responses {
                inst: downstream,
                data: BusResponse::IDLE,
            },
            L1Grant::Data => L1Responses {
                inst: BusResponse::IDLE,
                data: downstream,
            },
        }
    }

    /// Clock edge.
    pub fn clock(
        &mut self,
        inst: Option<&BusRequest>,
        data: Option<&BusRequest>,
        downstream: BusResponse,
    ) {
        self.grant = match self.grant {
            L1Grant::Idle if data.is_some() => L1Grant::Data,
            L1Grant::Idle if inst.is_some() => L1Grant::Instruction,
            L1Grant::Idle => L1Grant::Idle,
            L1Grant::Instruction if downstream.ready || inst.is_none() => L1Grant::Idle,
            L1Grant::Data if downstream.ready || data.is_none() => L1Grant::Idle,
            held => held,
        };
        if self.grant != L1Grant::Idle {
            tracing::trace!(grant = ?self.grant, "l1 arbiter");
        }
    }
}
