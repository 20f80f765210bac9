//! Vegetation index data models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A satellite NDVI observation for a farm
///
/// Sparse; the simulation carries the previous value forward on days
/// without an observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdviRecord {
    pub date: NaiveDate,
    pub ndvi: Decimal,
}
