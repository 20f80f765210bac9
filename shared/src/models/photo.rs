//! Crop photo analysis models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Action, ActionKind};

/// Stress categories the photo analysis can report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StressType {
    Drought,
    Nutrient,
    PestDisease,
    Other,
    None,
}

/// How urgently the reported stress needs attention
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// A corrective intervention suggested by the photo analysis
///
/// Same shape as [`Action`] plus a free-text rationale the simulation
/// engine ignores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestedAction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub amount: Decimal,
    pub reason: String,
}

impl SuggestedAction {
    /// Strip the rationale so the suggestion can re-enter the engine as an
    /// ordinary scheduled action.
    pub fn to_action(&self) -> Action {
        Action {
            date: self.date,
            kind: self.kind,
            amount: self.amount,
        }
    }
}

/// Result of analyzing a set of crop photographs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAnalysis {
    /// 0-100, 100 is perfect health
    pub health_score: i32,
    pub stress_type: StressType,
    /// 0.0-1.0
    pub confidence: f32,
    pub key_findings: Vec<String>,
    pub urgency: Urgency,
    pub advice: String,
    pub suggested_actions: Option<Vec<SuggestedAction>>,
}

/// A stored photo check: the analysis plus detected schedule conflicts and
/// the state of any applied fix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoCheck {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub analysis: PhotoAnalysis,
    pub conflicts: Vec<String>,
    pub fix_applied: bool,
    pub before_yield: Option<i32>,
    pub after_yield: Option<i32>,
    pub created_at: DateTime<Utc>,
}
