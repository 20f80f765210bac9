//! HTTP handlers for photo check endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::external::CropVisionClient;
use crate::services::photo_check::{ApplyFixInput, ApplyFixOutcome, PhotoCheckService};
use crate::AppState;
use shared::PhotoCheck;

/// Input for analyzing crop photos
#[derive(Debug, Deserialize)]
pub struct AnalyzeInput {
    pub farm_id: Uuid,
    /// Base64-encoded images
    pub images: Vec<String>,
}

/// Analyze crop photos for a farm
pub async fn create_photo_check(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeInput>,
) -> AppResult<Json<PhotoCheck>> {
    let client = CropVisionClient::new(
        state.config.crop_vision.api_endpoint.clone(),
        state.config.crop_vision.api_key.clone(),
    );
    let service = PhotoCheckService::with_client(state.db, client);
    let check = service.analyze(input.farm_id, input.images).await?;
    Ok(Json(check))
}

/// Query parameters for photo check listing
#[derive(Debug, Deserialize)]
pub struct PhotoCheckQuery {
    pub farm_id: Uuid,
}

/// List photo checks for a farm
pub async fn list_photo_checks(
    State(state): State<AppState>,
    Query(query): Query<PhotoCheckQuery>,
) -> AppResult<Json<Vec<PhotoCheck>>> {
    let service = PhotoCheckService::new(state.db);
    let checks = service.list_checks(query.farm_id).await?;
    Ok(Json(checks))
}

/// Get a photo check by ID
pub async fn get_photo_check(
    State(state): State<AppState>,
    Path(check_id): Path<Uuid>,
) -> AppResult<Json<PhotoCheck>> {
    let service = PhotoCheckService::new(state.db);
    let check = service.get_check(check_id).await?;
    Ok(Json(check))
}

/// Apply a photo check's suggested actions as a before/after simulation pair
pub async fn apply_photo_fix(
    State(state): State<AppState>,
    Path(check_id): Path<Uuid>,
    Json(input): Json<ApplyFixInput>,
) -> AppResult<Json<ApplyFixOutcome>> {
    let service = PhotoCheckService::new(state.db);
    let outcome = service.apply_fix(check_id, input).await?;
    Ok(Json(outcome))
}
