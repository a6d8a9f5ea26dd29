use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageGenError {
    #[error("image API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("image API transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("image API returned no images")]
    EmptyResponse,

    #[error("invalid image API response: {0}")]
    InvalidResponse(String),

    #[error("image API configuration error: {0}")]
    Config(String),
}

pub type ImageGenResult<T> = Result<T, ImageGenError>;
