use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ImageGenResult;

/// Parameters for one generation call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: String,
    pub quality: String,
    pub count: u8,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
            count: 1,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }
}

/// Text-to-image backend. Calls are not retried.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Short backend name for logs.
    fn provider(&self) -> &str;

    /// Generate images and return their URLs (at least one on success).
    async fn generate(&self, request: &ImageRequest) -> ImageGenResult<Vec<String>>;
}
