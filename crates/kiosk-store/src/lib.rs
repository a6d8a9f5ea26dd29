//! Remote file storage for the kiosk ledger.
//!
//! The ledger lives as a single named file in a third-party cloud drive. This
//! crate hides that drive behind the [`ObjectStore`] trait so the ledger logic
//! can be exercised against an in-memory store in tests.
//!
//! # Storage Backends
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and offline runs
//! - [`DriveObjectStore`] -- Google Drive v3 REST API over `reqwest`
//!
//! # Design Rules
//!
//! 1. Files are addressed by an opaque [`FileId`] assigned by the store.
//! 2. Names are not unique; callers decide what to do with duplicates.
//! 3. Content updates replace the whole file. There is no conditional write,
//!    so concurrent writers from different processes are last-writer-wins.
//! 4. The store never interprets file contents.

pub mod drive;
pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use drive::{DriveConfig, DriveObjectStore};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;
pub use types::{FileId, FileMetadata, PermissionGrant, PermissionRole, CSV_MIME};
