//! Bus Arbiter.
//!
//! Round-robin arbiter placing N tile master ports in front of the shared L2.
//! Arbitration is combinational from the current requests, the rotating
//! priority pointer and a lock:
//! 1. **Lock:** a master whose transaction is in flight keeps the grant for as
//!    long as it keeps requesting.
//! 2. **Round robin:** otherwise the first requester at or after `priority`
//!    wins.
//! 3. **Rotation:** when the granted transaction completes, priority moves to
//!    the next master, so two masters that both keep requesting alternate.

use crate::common::bus::{BusRequest, BusResponse};

/// N-way round-robin arbiter.
#[derive(Debug)]
pub struct BusArbiter {
    masters: usize,
    priority: usize,
    locked: Option<usize>,
}

impl BusArbiter {
    /// Creates an arbiter for `masters` ports (at least one).
    pub fn new(masters: usize) -> Self {
        Self {
            masters: masters.max(1),
            priority: 0,
            locked: None,
        }
    }

    /// Number of master ports.
    pub const fn masters(&self) -> usize {
        self.masters
    }

    /// Master that will be served first if several request together.
    pub const fn priority(&self) -> usize {
        self.priority
    }

    /// Master granted this cycle, if any.
    pub fn grant(&self, requests: &[Option<BusRequest>]) -> Option<usize> {
        let requesting = |m: usize| requests.get(m).is_some_and(Option::is_some);
        if let Some(m) = self.locked.filter(|&m| requesting(m)) {
            return Some(m);
        }
        (0..self.masters)
            .map(|i| (self.priority + i) % self.masters)
            .find(|&m| requesting(m))
    }

    /// Request forwarded to the L2 this cycle.
    pub fn request(&self, requests: &[Option<BusRequest>]) -> Option<BusRequest> {
        self.grant(requests).and_then(|m| requests[m])
    }

    /// Response seen by `master` this cycle.
    pub fn respond(
        &self,
        requests: &[Option<BusRequest>],
        master: usize,
        downstream: BusResponse,
    ) -> BusResponse {
        if self.grant(requests) == Some(master) {
            downstream
        } else {
            BusResponse::IDLE
        }
    }

    /// Clock edge.
    pub fn clock(&mut self, requests: &[Option<BusRequest>], downstream: BusResponse) {
        let Some(granted) = self.grant(requests) else {
            self.locked = None;
            return;
        };
        if downstream.ready {
            self.priority = (granted + 1) % self.masters;
            self.locked = None;
        } else {
            if self.locked != Some(granted) {
                tracing::debug!(master = granted, "bus arbiter grant");
            }
            self.locked = Some(granted);
        }
    }
}
