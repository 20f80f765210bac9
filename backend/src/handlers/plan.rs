//! HTTP handlers for saved plan and point endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::plan::{PlanService, PointTotal, SavePlanInput};
use crate::AppState;
use shared::{PaginatedResponse, Pagination, SavedPlan};

/// Save a plan; the simulation is re-run server-side
pub async fn create_plan(
    State(state): State<AppState>,
    Json(input): Json<SavePlanInput>,
) -> AppResult<Json<SavedPlan>> {
    let service = PlanService::new(state.db);
    let plan = service.save_plan(input).await?;
    Ok(Json(plan))
}

/// Query parameters for plan listing
#[derive(Debug, Deserialize)]
pub struct PlanListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List saved plans, newest first
pub async fn list_plans(
    State(state): State<AppState>,
    Query(query): Query<PlanListQuery>,
) -> AppResult<Json<PaginatedResponse<SavedPlan>>> {
    let default = Pagination::default();
    let pagination = Pagination {
        page: query.page.unwrap_or(default.page),
        per_page: query.per_page.unwrap_or(default.per_page),
    };

    let service = PlanService::new(state.db);
    let plans = service.list_plans(pagination).await?;
    Ok(Json(plans))
}

/// Get a saved plan by ID
pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> AppResult<Json<SavedPlan>> {
    let service = PlanService::new(state.db);
    let plan = service.get_plan(plan_id).await?;
    Ok(Json(plan))
}

/// Export a saved plan's timeline as CSV
pub async fn export_plan_timeline(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = PlanService::new(state.db);
    let csv = service.export_timeline_csv(plan_id).await?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}

/// Get the accumulated point total
pub async fn get_total_points(State(state): State<AppState>) -> AppResult<Json<PointTotal>> {
    let service = PlanService::new(state.db);
    let total = service.total_points().await?;
    Ok(Json(PointTotal { total }))
}
