use kiosk_imagegen::ImageGenError;
use kiosk_ledger::LedgerError;
use kiosk_quota::QuotaError;
use kiosk_types::{StallNo, TypeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field is empty or blank.
    #[error("{0}")]
    Validation(String),

    #[error("stall {0} is already registered")]
    DuplicateStall(StallNo),

    #[error("generation limit reached for stall {stall}: {used} of {limit} used")]
    QuotaExceeded { stall: StallNo, used: u32, limit: u32 },

    #[error("stall {0} is not registered; please register first")]
    NotRegistered(StallNo),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("image generation failed: {0}")]
    ImageGen(#[from] ImageGenError),

    #[error("quota error: {0}")]
    Quota(QuotaError),
}

impl ServiceError {
    /// Errors caused by a collaborator rather than by the request.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Ledger(_) | Self::ImageGen(_) | Self::Quota(_))
    }
}

impl From<TypeError> for ServiceError {
    fn from(e: TypeError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<QuotaError> for ServiceError {
    fn from(e: QuotaError) -> Self {
        match e {
            QuotaError::Exceeded { stall, used, limit } => Self::QuotaExceeded { stall, used, limit },
            other => Self::Quota(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
