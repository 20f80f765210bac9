//! HTTP handlers for simulation endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::simulation::{RunSimulationInput, SimulationService};
use crate::AppState;
use shared::SimulationResult;

/// Run a what-if simulation for a farm
pub async fn run_simulation(
    State(state): State<AppState>,
    Json(input): Json<RunSimulationInput>,
) -> AppResult<Json<SimulationResult>> {
    let service = SimulationService::new(state.db);
    let result = service.run(&input).await?;
    Ok(Json(result))
}
