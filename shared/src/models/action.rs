//! Scheduled intervention models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single scheduled intervention on a farm parcel
///
/// Immutable once created; the caller owns the full action list for one
/// simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub amount: Decimal,
}

/// Kinds of scheduled interventions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Irrigate,
    Fertilize,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Irrigate => write!(f, "irrigate"),
            ActionKind::Fertilize => write!(f, "fertilize"),
        }
    }
}
