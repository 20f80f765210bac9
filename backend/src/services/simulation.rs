//! Simulation service
//!
//! The boundary between HTTP inputs and the pure engine: validates the
//! request, loads the farm's record sets, and hands everything to
//! [`shared::run_simulation`]. The engine itself never fails; everything
//! that can go wrong is rejected here.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::farm::FarmService;
use shared::{run_simulation, Action, DateRange, SimulationResult};

/// Simulation service for running what-if plans against farm data
#[derive(Clone)]
pub struct SimulationService {
    db: PgPool,
}

/// Input for one simulation run
#[derive(Debug, Clone, Deserialize)]
pub struct RunSimulationInput {
    pub farm_id: Uuid,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl SimulationService {
    /// Create a new SimulationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Validate the request, load source data, and run the engine
    pub async fn run(&self, input: &RunSimulationInput) -> AppResult<SimulationResult> {
        shared::validate_date_range(input.from_date, input.to_date).map_err(|e| {
            AppError::Validation {
                field: "to_date".to_string(),
                message: e.to_string(),
                message_th: "วันที่เริ่มต้นต้องไม่อยู่หลังวันที่สิ้นสุด".to_string(),
            }
        })?;

        let range = DateRange::new(input.from_date, input.to_date);
        shared::validate_actions(&input.actions, &range)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let farms = FarmService::new(self.db.clone());
        let ndvi_history = farms.ndvi_series(input.farm_id).await?;
        shared::validate_ndvi_history(&ndvi_history).map_err(|e| AppError::Validation {
            field: "farm_id".to_string(),
            message: e.to_string(),
            message_th: "ฟาร์มนี้ยังไม่มีข้อมูล NDVI เพียงพอ".to_string(),
        })?;
        let weather_history = farms.weather_series(input.farm_id).await?;

        tracing::debug!(
            farm_id = %input.farm_id,
            days = range.len_days(),
            actions = input.actions.len(),
            "running simulation"
        );

        Ok(run_simulation(
            &range,
            &input.actions,
            &ndvi_history,
            &weather_history,
        ))
    }
}
