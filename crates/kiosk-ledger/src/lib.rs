//! Registration ledger for the kiosk.
//!
//! The ledger is a single CSV file kept in a remote [`ObjectStore`]. Every
//! write downloads the whole file, appends rows and uploads it again. This
//! crate provides:
//! - [`codec`] -- lossless CSV encode/decode of [`Ledger`]s
//! - [`LedgerStore`] -- find, read, append-and-save, access grants and the
//!   [`LedgerStore::transact`] read-modify-write cycle
//!
//! # Concurrency
//!
//! `transact` holds an in-process lock for the whole download/modify/upload
//! cycle, so writers inside one process never lose each other's rows. The
//! remote file has no version token, so two *processes* writing the same
//! file are still last-writer-wins.
//!
//! [`ObjectStore`]: kiosk_store::ObjectStore

pub mod access;
pub mod codec;
pub mod error;
pub mod ledger;
pub mod store;

pub use access::AccessGrant;
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use store::{Appended, LedgerStore};
