use kiosk_types::StallNo;
use serde::Serialize;

/// Counters for one stall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Usage {
    /// Completed generations.
    pub used: u32,
    /// Reserved but not yet committed or released.
    pub in_flight: u32,
}

impl Usage {
    /// Slots already spoken for.
    pub fn claimed(&self) -> u32 {
        self.used.saturating_add(self.in_flight)
    }
}

/// A claimed quota slot. Must be passed to exactly one of
/// [`QuotaStore::commit`](crate::QuotaStore::commit) or
/// [`QuotaStore::release`](crate::QuotaStore::release).
#[must_use = "a reservation holds a quota slot until committed or released"]
#[derive(Debug, PartialEq, Eq)]
pub struct Reservation {
    stall: StallNo,
}

impl Reservation {
    pub(crate) fn new(stall: StallNo) -> Self {
        Self { stall }
    }

    pub fn stall(&self) -> &StallNo {
        &self.stall
    }
}
