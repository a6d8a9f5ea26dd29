//! Foundation types for the kiosk registration ledger.
//!
//! Every other kiosk crate depends on `kiosk-types`.
//!
//! # Key Types
//!
//! - [`StallNo`]: the tenant key used for registration lookups and quotas
//! - [`Record`]: one ledger row, an ordered mapping of field name to value
//! - [`fields`]: the column names observed in the ledger file

pub mod error;
pub mod fields;
pub mod record;
pub mod stall;
pub mod timestamp;

pub use error::TypeError;
pub use record::Record;
pub use stall::StallNo;
