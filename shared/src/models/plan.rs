//! Saved plan models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Action, SimulationResult};

/// A saved what-if plan together with its simulation outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPlan {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub farm_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub actions: Vec<Action>,
    pub result: SimulationResult,
    /// Final-day yield projection, denormalized for list views
    pub final_yield: i32,
    pub points: u32,
    pub created_at: DateTime<Utc>,
}
