//! Simulation output models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Badge;

/// Daily crop condition classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CropCondition {
    Healthy,
    Stressed,
    Recovering,
}

impl std::fmt::Display for CropCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropCondition::Healthy => write!(f, "Healthy"),
            CropCondition::Stressed => write!(f, "Stressed"),
            CropCondition::Recovering => write!(f, "Recovering"),
        }
    }
}

/// Classify a day from its post-update soil moisture and nutrient levels
pub fn classify_condition(soil_moisture: Decimal, nutrients: Decimal) -> CropCondition {
    if soil_moisture >= Decimal::from(50)
        && soil_moisture <= Decimal::from(80)
        && nutrients >= Decimal::from(55)
        && nutrients <= Decimal::from(85)
    {
        return CropCondition::Healthy;
    }
    if soil_moisture < Decimal::from(45) || nutrients > Decimal::from(90) {
        return CropCondition::Stressed;
    }
    CropCondition::Recovering
}

/// Immutable per-day snapshot emitted by the simulation loop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayResult {
    pub date: NaiveDate,
    pub soil_moisture: i32,
    pub nutrients: i32,
    /// Vegetation index, rounded to two decimals
    pub ndvi: Decimal,
    pub yield_projection: i32,
    pub condition: CropCondition,
}

/// The complete output of one simulation run
///
/// Immutable; safe to persist or display as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationResult {
    pub timeline: Vec<DayResult>,
    pub points: u32,
    pub badges: Vec<Badge>,
    pub warnings: Vec<String>,
}
