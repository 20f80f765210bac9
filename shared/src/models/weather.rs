//! Weather data models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily weather record for a farm
///
/// Externally supplied, read-only. Days without a record simply contribute
/// no weather effect to the simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub min_temp_celsius: Decimal,
    pub max_temp_celsius: Decimal,
    pub precipitation_mm: Decimal,
}
