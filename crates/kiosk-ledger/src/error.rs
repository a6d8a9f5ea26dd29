use kiosk_store::StoreError;

/// Errors produced by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The downloaded file could not be parsed. The ledger is left untouched;
    /// it is never replaced by an empty one.
    #[error("malformed ledger: {0}")]
    Malformed(String),

    #[error("cannot encode ledger: {0}")]
    Encode(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
