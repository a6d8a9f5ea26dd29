use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ImageGenError, ImageGenResult};
use crate::traits::{ImageGenerator, ImageRequest};

/// Generator that always answers with the same URL.
///
/// Counts calls and remembers prompts so tests can assert whether the
/// remote API would have been hit.
#[derive(Debug)]
pub struct FixedImageGenerator {
    url: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    failing: bool,
}

impl FixedImageGenerator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    /// A generator whose every call fails like an upstream outage.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl ImageGenerator for FixedImageGenerator {
    fn provider(&self) -> &str {
        "fixed"
    }

    async fn generate(&self, request: &ImageRequest) -> ImageGenResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("lock poisoned")
            .push(request.prompt.clone());
        if self.failing {
            return Err(ImageGenError::Api {
                status: 503,
                body: "generator unavailable".into(),
            });
        }
        Ok(vec![self.url.clone(); usize::from(request.count.max(1))])
    }
}
