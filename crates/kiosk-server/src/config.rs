use std::net::SocketAddr;
use std::path::Path;

use kiosk_imagegen::OpenAiConfig;
use kiosk_service::ServiceConfig;
use kiosk_store::DriveConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Browser origins allowed by CORS. `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
    pub service: ServiceConfig,
    pub storage: StorageBackend,
    pub images: ImageBackend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            service: ServiceConfig::default(),
            storage: StorageBackend::Drive(DriveConfig::default()),
            images: ImageBackend::Openai(OpenAiConfig::default()),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }
}

/// Where the ledger file lives.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageBackend {
    Drive(DriveConfig),
    /// Process-local store; the ledger is lost on exit.
    Memory,
}

/// Which image generator to call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageBackend {
    Openai(OpenAiConfig),
    /// Always return the same URL.
    Fixed { url: String },
}
