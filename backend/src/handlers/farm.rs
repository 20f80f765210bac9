//! HTTP handlers for farm data endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::FarmService;
use crate::AppState;
use shared::{Farm, NdviRecord, WeatherRecord};

/// List all farms
pub async fn list_farms(State(state): State<AppState>) -> AppResult<Json<Vec<Farm>>> {
    let service = FarmService::new(state.db);
    let farms = service.list_farms().await?;
    Ok(Json(farms))
}

/// Get a farm by ID
pub async fn get_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> AppResult<Json<Farm>> {
    let service = FarmService::new(state.db);
    let farm = service.get_farm(farm_id).await?;
    Ok(Json(farm))
}

/// Get the farm's NDVI observation series
pub async fn get_farm_ndvi(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> AppResult<Json<Vec<NdviRecord>>> {
    let service = FarmService::new(state.db);
    let records = service.ndvi_series(farm_id).await?;
    Ok(Json(records))
}

/// Get the farm's daily weather series
pub async fn get_farm_weather(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> AppResult<Json<Vec<WeatherRecord>>> {
    let service = FarmService::new(state.db);
    let records = service.weather_series(farm_id).await?;
    Ok(Json(records))
}
