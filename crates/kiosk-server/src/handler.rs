use axum::extract::{Path, State};
use axum::response::Json;
use kiosk_service::{GenerationRequest, RegistrationForm};
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::router::AppState;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub image_url: String,
    pub remaining_generations: u32,
}

#[derive(Debug, Serialize)]
pub struct LimitResponse {
    pub remaining_generations: u32,
    pub total_generations: u32,
    pub used_generations: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUrlResponse {
    pub file_url: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<RegistrationForm>,
) -> Result<Json<RegisterResponse>, ApiError> {
    state.service.register(form).await?;
    Ok(Json(RegisterResponse {
        success: true,
        message: "Registration saved successfully".to_string(),
    }))
}

pub async fn generate_image(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<GenerationRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let generated = state.service.generate_image(request).await?;
    Ok(Json(GenerateResponse {
        success: true,
        image_url: generated.image_url,
        remaining_generations: generated.remaining,
    }))
}

pub async fn check_limit(
    State(state): State<AppState>,
    Path(stall_no): Path<String>,
) -> Result<Json<LimitResponse>, ApiError> {
    let status = state.service.check_limit(&stall_no)?;
    Ok(Json(LimitResponse {
        remaining_generations: status.remaining,
        total_generations: status.total,
        used_generations: status.used,
    }))
}

pub async fn registration_file(
    State(state): State<AppState>,
) -> Result<Json<FileUrlResponse>, ApiError> {
    let file_url = state
        .service
        .ledger_link()
        .await?
        .ok_or(ApiError::LedgerMissing)?;
    Ok(Json(FileUrlResponse { file_url }))
}

/// Same as [`registration_file`], and also writes the link to the log for operators.
pub async fn admin_spreadsheet(
    state: State<AppState>,
) -> Result<Json<FileUrlResponse>, ApiError> {
    let response = registration_file(state).await?;
    tracing::info!(url = %response.file_url, "ledger link requested");
    Ok(response)
}
