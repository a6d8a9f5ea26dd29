//! Registration and image quota service.
//!
//! [`KioskService`] is the entry point used by the HTTP layer. It owns the
//! ledger, the quota store and the image generator, and implements the two
//! write flows:
//!
//! - `register`: validate, check for a duplicate stall, append a row, share
//!   the ledger with the configured admins.
//! - `generate_image`: validate, claim a quota slot, look up the stall's
//!   registration, call the generator, count the generation, append a row.

pub mod config;
pub mod error;
pub mod forms;
pub mod outcome;
pub mod service;

pub use config::{RegistrationSchema, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use forms::{GenerationRequest, RegistrationForm};
pub use outcome::{Generated, LimitStatus, Registered};
pub use service::KioskService;

pub use kiosk_ledger::AccessGrant;
pub use kiosk_types::{Record, StallNo};
