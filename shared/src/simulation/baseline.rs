//! Simulation seeding from historical observations

use rust_decimal::Decimal;

use crate::models::{CropCondition, NdviRecord};
use crate::simulation::engine::{to_percent, NdviWindow, SimulationState};

/// Trailing NDVI observations used to derive the starting vegetation index
pub(crate) const BASELINE_WINDOW_DAYS: usize = 14;

/// Seed the run state from the trailing window of NDVI history.
///
/// Soil moisture and nutrients start at a fixed mid-range healthy baseline
/// independent of the farm; the vegetation index and yield projection come
/// from the mean of the trailing observations, which also pre-fill the
/// rolling window behind the yield projection.
///
/// Precondition: `ndvi_history` is non-empty, enforced by boundary
/// validation before the engine is invoked.
pub(crate) fn seed_state(ndvi_history: &[NdviRecord]) -> SimulationState {
    let window_start = ndvi_history.len().saturating_sub(BASELINE_WINDOW_DAYS);
    let baseline: Vec<Decimal> = ndvi_history[window_start..]
        .iter()
        .map(|record| record.ndvi)
        .collect();
    let initial_ndvi = baseline.iter().copied().sum::<Decimal>() / Decimal::from(baseline.len());

    SimulationState {
        soil_moisture: Decimal::from(55),
        nutrients: Decimal::from(70),
        ndvi: initial_ndvi,
        yield_projection: to_percent(initial_ndvi),
        condition: CropCondition::Healthy,
        healthy_days: 0,
        stressed_days: 0,
        over_fertilized_stress_days: 0,
        ndvi_window: NdviWindow::seeded(&baseline),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn history(values: &[&str]) -> Vec<NdviRecord> {
        let start: NaiveDate = "2025-08-01".parse().unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| NdviRecord {
                date: start + chrono::Days::new(i as u64),
                ndvi: dec(v),
            })
            .collect()
    }

    #[test]
    fn test_seed_uses_mean_of_trailing_window() {
        let records = history(&["0.4", "0.6"]);
        let state = seed_state(&records);
        assert_eq!(state.ndvi, dec("0.5"));
        assert_eq!(state.yield_projection, 50);
    }

    #[test]
    fn test_seed_takes_at_most_fourteen_records() {
        // 16 records: two leading outliers must be ignored
        let mut values = vec!["0.9", "0.9"];
        values.extend(std::iter::repeat("0.5").take(14));
        let state = seed_state(&history(&values));
        assert_eq!(state.ndvi, dec("0.5"));
    }

    #[test]
    fn test_seed_accepts_short_history() {
        let records = history(&["0.62"]);
        let state = seed_state(&records);
        assert_eq!(state.ndvi, dec("0.62"));
        assert_eq!(state.yield_projection, 62);
    }

    #[test]
    fn test_fixed_soil_and_nutrient_baseline() {
        let state = seed_state(&history(&["0.5"]));
        assert_eq!(state.soil_moisture, Decimal::from(55));
        assert_eq!(state.nutrients, Decimal::from(70));
        assert_eq!(state.healthy_days, 0);
        assert_eq!(state.stressed_days, 0);
        assert_eq!(state.over_fertilized_stress_days, 0);
    }
}
