use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ImageGenError, ImageGenResult};
use crate::traits::{ImageGenerator, ImageRequest};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: "dall-e-3".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 300,
        }
    }
}

#[derive(Clone)]
pub struct OpenAiImages {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GenerationData>,
}

#[derive(Debug, Deserialize)]
struct GenerationData {
    #[serde(default)]
    url: Option<String>,
}

impl OpenAiImages {
    pub fn new(api_key: impl Into<String>) -> ImageGenResult<Self> {
        let defaults = OpenAiConfig::default();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(defaults.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: defaults.base_url,
            api_key: api_key.into(),
            model: defaults.model,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Build a client from config, reading the key from the environment.
    pub fn from_config(config: &OpenAiConfig) -> ImageGenResult<Self> {
        let key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ImageGenError::Config(format!("{} is not set", config.api_key_env)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::new(key)?
            .with_http_client(http)
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone()))
    }

    fn images_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/images/generations") {
            base.to_string()
        } else {
            format!("{base}/images/generations")
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImages {
    fn provider(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: &ImageRequest) -> ImageGenResult<Vec<String>> {
        let body = json!({
            "model": self.model,
            "prompt": request.prompt,
            "size": request.size,
            "quality": request.quality,
            "n": request.count,
        });

        let response = self
            .http
            .post(self.images_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "image generation failed");
            return Err(ImageGenError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ImageGenError::InvalidResponse(e.to_string()))?;
        let urls: Vec<String> = parsed.data.into_iter().filter_map(|d| d.url).collect();
        if urls.is_empty() {
            return Err(ImageGenError::EmptyResponse);
        }
        Ok(urls)
    }
}
