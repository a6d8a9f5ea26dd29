use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] kiosk_store::StoreError),

    #[error("image generator error: {0}")]
    ImageGen(#[from] kiosk_imagegen::ImageGenError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Error half of every handler. Renders as a JSON body with a `detail` message.
#[derive(Debug)]
pub enum ApiError {
    Service(kiosk_service::ServiceError),
    /// The ledger file has not been created yet.
    LedgerMissing,
    /// The request body was not the JSON the route expects.
    Body(axum::extract::rejection::JsonRejection),
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl From<kiosk_service::ServiceError> for ApiError {
    fn from(e: kiosk_service::ServiceError) -> Self {
        Self::Service(e)
    }
}

impl ApiError {
    pub fn status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        use kiosk_service::ServiceError;

        match self {
            Self::LedgerMissing => StatusCode::NOT_FOUND,
            Self::Body(rejection) => rejection.status(),
            Self::Service(e) => match e {
                ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ServiceError::DuplicateStall(_) | ServiceError::NotRegistered(_) => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
                ServiceError::Ledger(_) | ServiceError::ImageGen(_) | ServiceError::Quota(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use kiosk_service::ServiceError;

        let status = self.status();
        let body = match &self {
            Self::LedgerMissing | Self::Body(_) => serde_json::json!({ "detail": self.message() }),
            Self::Service(ServiceError::QuotaExceeded { used, limit, .. }) => serde_json::json!({
                "detail": self.message(),
                "used_generations": used,
                "total_generations": limit,
            }),
            Self::Service(e) => {
                if e.is_upstream() {
                    tracing::error!(error = %e, "request failed upstream");
                }
                serde_json::json!({ "detail": self.message() })
            }
        };
        (status, axum::Json(body)).into_response()
    }
}

impl ApiError {
    fn message(&self) -> String {
        match self {
            Self::LedgerMissing => "registration file not found".to_string(),
            Self::Body(rejection) => rejection.body_text(),
            Self::Service(e) => e.to_string(),
        }
    }
}
