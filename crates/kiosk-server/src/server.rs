use std::sync::Arc;

use kiosk_imagegen::{FixedImageGenerator, ImageGenerator, OpenAiImages};
use kiosk_quota::InMemoryQuotaStore;
use kiosk_service::KioskService;
use kiosk_store::{DriveObjectStore, InMemoryObjectStore, ObjectStore};
use tokio::net::TcpListener;

use crate::config::{ImageBackend, ServerConfig, StorageBackend};
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// Kiosk HTTP server.
pub struct KioskServer {
    config: ServerConfig,
    service: Arc<KioskService>,
}

impl KioskServer {
    /// Build the configured backends. Fails if a credential is missing.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store: Arc<dyn ObjectStore> = match &config.storage {
            StorageBackend::Drive(drive) => Arc::new(DriveObjectStore::from_config(drive)?),
            StorageBackend::Memory => {
                tracing::warn!("using in-memory storage; the ledger will not survive a restart");
                Arc::new(InMemoryObjectStore::new())
            }
        };
        let images: Arc<dyn ImageGenerator> = match &config.images {
            ImageBackend::Openai(openai) => Arc::new(OpenAiImages::from_config(openai)?),
            ImageBackend::Fixed { url } => Arc::new(FixedImageGenerator::new(url.clone())),
        };
        let service = KioskService::new(
            config.service.clone(),
            store,
            Arc::new(InMemoryQuotaStore::new()),
            images,
        );
        Ok(Self::with_service(config, Arc::new(service)))
    }

    /// Wrap an already-built service.
    pub fn with_service(config: ServerConfig, service: Arc<KioskService>) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<KioskService> {
        &self.service
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        build_router(AppState::new(self.service.clone()), &self.config.allowed_origins)
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            ledger = %self.config.service.ledger_name,
            "kiosk server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
