use kiosk_types::StallNo;

use crate::error::QuotaResult;
use crate::types::{Reservation, Usage};

/// Storage for per-stall generation counts.
///
/// Implementations must make `reserve` atomic per stall: the check against
/// `limit` and the claim of the slot happen under one lock or transaction.
pub trait QuotaStore: Send + Sync {
    /// Current counters for `stall` (zero if never seen).
    fn usage(&self, stall: &StallNo) -> Usage;

    /// Claim one slot if `used + in_flight < limit`.
    ///
    /// Fails with [`QuotaError::Exceeded`](crate::QuotaError::Exceeded)
    /// carrying the completed count otherwise.
    fn reserve(&self, stall: &StallNo, limit: u32) -> QuotaResult<Reservation>;

    /// Turn a reservation into a completed generation. Returns the new
    /// completed count.
    fn commit(&self, reservation: Reservation) -> QuotaResult<u32>;

    /// Give the slot back without counting a generation.
    fn release(&self, reservation: Reservation) -> QuotaResult<()>;
}
