use std::collections::HashMap;
use std::sync::Mutex;

use kiosk_types::StallNo;

use crate::error::{QuotaError, QuotaResult};
use crate::traits::QuotaStore;
use crate::types::{Reservation, Usage};

/// Process-lifetime quota store.
///
/// One mutex guards the whole map; every operation is a short critical
/// section with no I/O.
#[derive(Debug, Default)]
pub struct InMemoryQuotaStore {
    counters: Mutex<HashMap<StallNo, Usage>>,
}

impl InMemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stalls with any recorded activity.
    pub fn len(&self) -> usize {
        self.counters.lock().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QuotaStore for InMemoryQuotaStore {
    fn usage(&self, stall: &StallNo) -> Usage {
        let counters = self.counters.lock().expect("lock poisoned");
        counters.get(stall).copied().unwrap_or_default()
    }

    fn reserve(&self, stall: &StallNo, limit: u32) -> QuotaResult<Reservation> {
        let mut counters = self.counters.lock().expect("lock poisoned");
        let usage = counters.entry(stall.clone()).or_default();
        if usage.claimed() >= limit {
            tracing::debug!(stall = %stall, used = usage.used, in_flight = usage.in_flight, limit, "quota exhausted");
            return Err(QuotaError::Exceeded {
                stall: stall.clone(),
                used: usage.used,
                limit,
            });
        }
        usage.in_flight += 1;
        Ok(Reservation::new(stall.clone()))
    }

    fn commit(&self, reservation: Reservation) -> QuotaResult<u32> {
        let mut counters = self.counters.lock().expect("lock poisoned");
        let usage = counters
            .get_mut(reservation.stall())
            .filter(|u| u.in_flight > 0)
            .ok_or_else(|| QuotaError::UnknownReservation(reservation.stall().clone()))?;
        usage.in_flight -= 1;
        usage.used += 1;
        Ok(usage.used)
    }

    fn release(&self, reservation: Reservation) -> QuotaResult<()> {
        let mut counters = self.counters.lock().expect("lock poisoned");
        let usage = counters
            .get_mut(reservation.stall())
            .filter(|u| u.in_flight > 0)
            .ok_or_else(|| QuotaError::UnknownReservation(reservation.stall().clone()))?;
        usage.in_flight -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn stall(s: &str) -> StallNo {
        StallNo::parse(s).unwrap()
    }

    #[test]
    fn fresh_stall_has_zero_usage() {
        let store = InMemoryQuotaStore::new();
        assert_eq!(store.usage(&stall("A1")), Usage::default());
        assert!(store.is_empty());
    }

    #[test]
    fn commit_counts_up_to_limit() {
        let store = InMemoryQuotaStore::new();
        let a1 = stall("A1");
        for expected in 1..=3 {
            let r = store.reserve(&a1, 3).unwrap();
            assert_eq!(store.commit(r).unwrap(), expected);
        }
        let err = store.reserve(&a1, 3).unwrap_err();
        assert_eq!(
            err,
            QuotaError::Exceeded { stall: a1.clone(), used: 3, limit: 3 }
        );
        assert_eq!(store.usage(&a1).used, 3);
    }

    #[test]
    fn release_returns_the_slot() {
        let store = InMemoryQuotaStore::new();
        let a1 = stall("A1");
        let r = store.reserve(&a1, 1).unwrap();
        assert!(store.reserve(&a1, 1).is_err());
        store.release(r).unwrap();
        assert_eq!(store.usage(&a1), Usage::default());
        assert!(store.reserve(&a1, 1).is_ok());
    }

    #[test]
    fn stalls_are_independent() {
        let store = InMemoryQuotaStore::new();
        let r = store.reserve(&stall("A1"), 1).unwrap();
        store.commit(r).unwrap();
        assert!(store.reserve(&stall("B2"), 1).is_ok());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn in_flight_counts_against_limit() {
        let store = InMemoryQuotaStore::new();
        let a1 = stall("A1");
        let _held = store.reserve(&a1, 2).unwrap();
        let _held2 = store.reserve(&a1, 2).unwrap();
        // Nothing committed yet, but both slots are taken.
        let err = store.reserve(&a1, 2).unwrap_err();
        assert!(matches!(err, QuotaError::Exceeded { used: 0, .. }));
    }

    #[test]
    fn commit_without_reservation_is_rejected() {
        let store = InMemoryQuotaStore::new();
        let bogus = Reservation::new(stall("Z9"));
        assert!(matches!(
            store.commit(bogus),
            Err(QuotaError::UnknownReservation(_))
        ));
    }

    #[tokio::test]
    async fn last_slot_race_has_one_winner() {
        let store = Arc::new(InMemoryQuotaStore::new());
        let a1 = stall("A1");
        for _ in 0..2 {
            let r = store.reserve(&a1, 3).unwrap();
            store.commit(r).unwrap();
        }

        let mut handles = Vec::new();
        for _ in 0..2 {
            let store = store.clone();
            let a1 = a1.clone();
            handles.push(tokio::spawn(async move {
                match store.reserve(&a1, 3) {
                    Ok(r) => {
                        tokio::task::yield_now().await;
                        store.commit(r).map(|_| true)
                    }
                    Err(_) => Ok(false),
                }
            }));
        }
        let mut winners = 0;
        for h in handles {
            if h.await.unwrap().unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(store.usage(&a1).used, 3);
    }
}
