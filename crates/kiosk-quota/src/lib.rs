//! Per-stall image generation quota.
//!
//! A quota store counts completed generations per [`StallNo`]. Generations
//! take a [`Reservation`] before calling the image API and either commit it
//! (the count goes up) or release it (nothing changes). Reserving counts
//! in-flight work, so concurrent requests for the same stall can never push
//! the count past the limit.
//!
//! Counts live in memory and reset when the process restarts.
//!
//! [`StallNo`]: kiosk_types::StallNo

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{QuotaError, QuotaResult};
pub use memory::InMemoryQuotaStore;
pub use traits::QuotaStore;
pub use types::{Reservation, Usage};
