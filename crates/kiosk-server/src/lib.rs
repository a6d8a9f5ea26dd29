//! HTTP server for the stall kiosk.
//!
//! Exposes registration, image generation, quota lookup and the ledger
//! link as JSON endpoints for the browser frontend. Errors render as
//! `{"detail": ...}` with a status that tells the frontend what to show.

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ImageBackend, ServerConfig, StorageBackend};
pub use error::{ApiError, ServerError, ServerResult};
pub use extract::JsonBody;
pub use router::{build_router, AppState};
pub use server::KioskServer;
