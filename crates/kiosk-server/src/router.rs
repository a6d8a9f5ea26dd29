use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use kiosk_service::KioskService;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{ServerError, ServerResult};
use crate::handler;

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: Arc<KioskService>,
}

impl AppState {
    pub fn new(service: Arc<KioskService>) -> Self {
        Self { service }
    }
}

/// Build the axum router with all kiosk endpoints.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> ServerResult<Router> {
    let router = Router::new()
        .route("/health", get(handler::health))
        .route("/api/register", post(handler::register))
        .route("/generate-image", post(handler::generate_image))
        .route("/api/generate-image", post(handler::generate_image))
        .route("/check-generation-limit/:stall_no", get(handler::check_limit))
        .route("/api/check-generation-limit/:stall_no", get(handler::check_limit))
        .route("/api/registration-file", get(handler::registration_file))
        .route("/admin/get-spreadsheet", get(handler::admin_spreadsheet))
        .with_state(state)
        .layer(cors_layer(allowed_origins)?)
        .layer(TraceLayer::new_for_http());
    Ok(router)
}

fn cors_layer(allowed_origins: &[String]) -> ServerResult<CorsLayer> {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values = allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|_| ServerError::Config(format!("invalid CORS origin: {o}")))
            })
            .collect::<ServerResult<Vec<_>>>()?;
        AllowOrigin::list(values)
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
