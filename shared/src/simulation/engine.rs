//! The daily transition engine
//!
//! Advances soil moisture, nutrients, vegetation index, and yield projection
//! one calendar day at a time. The state is an explicit value threaded
//! through [`step`]; nothing is shared between runs.

use std::collections::VecDeque;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    classify_condition, Action, ActionKind, CropCondition, DayResult, WeatherRecord,
};

/// Trailing window of vegetation-index values feeding the yield projection
pub(crate) const YIELD_WINDOW_DAYS: usize = 20;

/// Fixed-capacity FIFO of recent vegetation-index values
///
/// Holds at most [`YIELD_WINDOW_DAYS`] entries; pushing past capacity drops
/// the oldest, so the trailing-window bound is enforced structurally rather
/// than by callers trimming a list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NdviWindow {
    values: VecDeque<Decimal>,
}

impl NdviWindow {
    pub(crate) fn seeded(values: &[Decimal]) -> Self {
        let mut window = NdviWindow {
            values: VecDeque::with_capacity(YIELD_WINDOW_DAYS),
        };
        for value in values {
            window.push(*value);
        }
        window
    }

    pub(crate) fn push(&mut self, value: Decimal) {
        if self.values.len() == YIELD_WINDOW_DAYS {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Arithmetic mean of the window. Never called on an empty window: the
    /// seed always carries at least one baseline observation.
    pub(crate) fn mean(&self) -> Decimal {
        self.values.iter().sum::<Decimal>() / Decimal::from(self.values.len())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}

/// Accumulator for one simulation run, threaded by value through [`step`]
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SimulationState {
    pub(crate) soil_moisture: Decimal,
    pub(crate) nutrients: Decimal,
    pub(crate) ndvi: Decimal,
    pub(crate) yield_projection: i32,
    pub(crate) condition: CropCondition,
    pub(crate) healthy_days: u32,
    pub(crate) stressed_days: u32,
    pub(crate) over_fertilized_stress_days: u32,
    pub(crate) ndvi_window: NdviWindow,
}

/// Scale an NDVI value to a whole percentage
pub(crate) fn to_percent(ndvi: Decimal) -> i32 {
    (ndvi * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}

fn round_level(value: Decimal) -> i32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}

/// Advance the state by one calendar day and emit that day's snapshot.
///
/// Same-day actions are applied in schedule order so their effects are
/// visible on the day they occur; classification reads the fully updated
/// levels. Soil moisture and nutrients are clamped to [0, 100] after every
/// mutation, the vegetation index to [0.30, 0.90].
pub(crate) fn step(
    mut state: SimulationState,
    date: NaiveDate,
    weather: Option<&WeatherRecord>,
    observed_ndvi: Option<Decimal>,
    actions: &[&Action],
) -> (SimulationState, DayResult) {
    // Daily evapotranspiration loss
    state.soil_moisture -= Decimal::from(2);

    // Rainfall of at least 5mm replenishes the soil
    if let Some(weather) = weather {
        if weather.precipitation_mm >= Decimal::from(5) {
            state.soil_moisture += Decimal::from(5);
        }
    }
    state.soil_moisture = clamp_level(state.soil_moisture);

    for action in actions {
        match action.kind {
            ActionKind::Irrigate => {
                state.soil_moisture += (action.amount / Decimal::from(2)).min(Decimal::from(12));
            }
            ActionKind::Fertilize => {
                state.nutrients += (action.amount / Decimal::from(3)).min(Decimal::from(12));
                // Working fertilizer into the soil costs moisture
                state.soil_moisture -= Decimal::from(4);
            }
        }
    }
    state.soil_moisture = clamp_level(state.soil_moisture);

    // Daily nutrient decay
    state.nutrients -= Decimal::ONE;
    state.nutrients = clamp_level(state.nutrients);

    state.condition = classify_condition(state.soil_moisture, state.nutrients);

    match state.condition {
        CropCondition::Healthy => state.healthy_days += 1,
        CropCondition::Stressed => state.stressed_days += 1,
        CropCondition::Recovering => {}
    }
    // Independent of the classification counters; one day can increment both
    // this and the stressed count
    if state.nutrients > Decimal::from(90) && state.soil_moisture < Decimal::from(45) {
        state.over_fertilized_stress_days += 1;
    }

    // Vegetation index: the day's observation wins, otherwise carry forward
    let mut ndvi = observed_ndvi.unwrap_or(state.ndvi);
    if state.condition != CropCondition::Stressed
        && state.soil_moisture >= Decimal::from(55)
        && state.soil_moisture <= Decimal::from(75)
    {
        ndvi += Decimal::new(1, 2);
    }
    if state.condition == CropCondition::Stressed {
        ndvi -= Decimal::new(2, 2);
    }
    ndvi = ndvi.clamp(Decimal::new(30, 2), Decimal::new(90, 2));
    state.ndvi = ndvi;
    state.ndvi_window.push(ndvi);

    state.yield_projection = to_percent(state.ndvi_window.mean());

    let result = DayResult {
        date,
        soil_moisture: round_level(state.soil_moisture),
        nutrients: round_level(state.nutrients),
        ndvi: ndvi.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        yield_projection: state.yield_projection,
        condition: state.condition,
    };
    (state, result)
}

fn clamp_level(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn base_state() -> SimulationState {
        SimulationState {
            soil_moisture: Decimal::from(55),
            nutrients: Decimal::from(70),
            ndvi: dec("0.5"),
            yield_projection: 50,
            condition: CropCondition::Healthy,
            healthy_days: 0,
            stressed_days: 0,
            over_fertilized_stress_days: 0,
            ndvi_window: NdviWindow::seeded(&[dec("0.5")]),
        }
    }

    fn rain(on: &str, mm: &str) -> WeatherRecord {
        WeatherRecord {
            date: date(on),
            min_temp_celsius: Decimal::from(14),
            max_temp_celsius: Decimal::from(26),
            precipitation_mm: dec(mm),
        }
    }

    fn irrigate(on: &str, amount: i64) -> Action {
        Action {
            date: date(on),
            kind: ActionKind::Irrigate,
            amount: Decimal::from(amount),
        }
    }

    fn fertilize(on: &str, amount: i64) -> Action {
        Action {
            date: date(on),
            kind: ActionKind::Fertilize,
            amount: Decimal::from(amount),
        }
    }

    #[test]
    fn test_daily_losses_without_weather_or_actions() {
        let (state, day) = step(base_state(), date("2025-09-05"), None, None, &[]);
        assert_eq!(state.soil_moisture, Decimal::from(53));
        assert_eq!(state.nutrients, Decimal::from(69));
        assert_eq!(day.soil_moisture, 53);
        assert_eq!(day.nutrients, 69);
        assert_eq!(day.condition, CropCondition::Healthy);
    }

    #[test]
    fn test_rain_replenishes_soil_at_threshold() {
        let weather = rain("2025-09-05", "5");
        let (state, _) = step(base_state(), date("2025-09-05"), Some(&weather), None, &[]);
        // -2 evapotranspiration, +5 rain
        assert_eq!(state.soil_moisture, Decimal::from(58));
    }

    #[test]
    fn test_light_rain_has_no_effect() {
        let weather = rain("2025-09-05", "4.9");
        let (state, _) = step(base_state(), date("2025-09-05"), Some(&weather), None, &[]);
        assert_eq!(state.soil_moisture, Decimal::from(53));
    }

    #[test]
    fn test_irrigation_effect_is_half_amount() {
        let action = irrigate("2025-09-05", 10);
        let (state, _) = step(base_state(), date("2025-09-05"), None, None, &[&action]);
        // 55 - 2 + 10/2
        assert_eq!(state.soil_moisture, Decimal::from(58));
    }

    #[test]
    fn test_irrigation_effect_capped_at_twelve() {
        let action = irrigate("2025-09-05", 100);
        let (state, _) = step(base_state(), date("2025-09-05"), None, None, &[&action]);
        assert_eq!(state.soil_moisture, Decimal::from(65));
    }

    #[test]
    fn test_fertilizer_adds_nutrients_and_costs_moisture() {
        let action = fertilize("2025-09-05", 30);
        let (state, _) = step(base_state(), date("2025-09-05"), None, None, &[&action]);
        // nutrients: 70 + 30/3 - 1 decay
        assert_eq!(state.nutrients, Decimal::from(79));
        // soil: 55 - 2 - 4
        assert_eq!(state.soil_moisture, Decimal::from(49));
    }

    #[test]
    fn test_fertilizer_effect_capped_at_twelve() {
        let action = fertilize("2025-09-05", 600);
        let (state, _) = step(base_state(), date("2025-09-05"), None, None, &[&action]);
        assert_eq!(state.nutrients, Decimal::from(81));
    }

    #[test]
    fn test_multiple_same_day_actions_apply_in_order() {
        let a = irrigate("2025-09-05", 24);
        let b = fertilize("2025-09-05", 30);
        let (state, _) = step(base_state(), date("2025-09-05"), None, None, &[&a, &b]);
        // soil: 55 - 2 + 12 - 4
        assert_eq!(state.soil_moisture, Decimal::from(61));
        assert_eq!(state.nutrients, Decimal::from(79));
    }

    #[test]
    fn test_soil_moisture_clamped_at_zero() {
        let mut state = base_state();
        state.soil_moisture = Decimal::ONE;
        let (state, day) = step(state, date("2025-09-05"), None, None, &[]);
        assert_eq!(state.soil_moisture, Decimal::ZERO);
        assert_eq!(day.soil_moisture, 0);
    }

    #[test]
    fn test_soil_moisture_clamped_at_hundred() {
        let mut state = base_state();
        state.soil_moisture = Decimal::from(99);
        let action = irrigate("2025-09-05", 24);
        let (state, _) = step(state, date("2025-09-05"), None, None, &[&action]);
        assert_eq!(state.soil_moisture, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_nutrients_clamped_at_hundred() {
        let mut state = base_state();
        state.nutrients = Decimal::from(95);
        let action = fertilize("2025-09-05", 36);
        let (state, _) = step(state, date("2025-09-05"), None, None, &[&action]);
        // 95 + 12 - 1 decay, clamped after the decay step
        assert_eq!(state.nutrients, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_stress_counter_and_over_fertilization_counter_both_fire() {
        let mut state = base_state();
        state.soil_moisture = Decimal::from(40);
        state.nutrients = Decimal::from(95);
        let (state, day) = step(state, date("2025-09-05"), None, None, &[]);
        assert_eq!(day.condition, CropCondition::Stressed);
        assert_eq!(state.stressed_days, 1);
        assert_eq!(state.over_fertilized_stress_days, 1);
    }

    #[test]
    fn test_dry_stress_without_nutrient_excess_skips_over_fert_counter() {
        let mut state = base_state();
        state.soil_moisture = Decimal::from(40);
        let (state, day) = step(state, date("2025-09-05"), None, None, &[]);
        assert_eq!(day.condition, CropCondition::Stressed);
        assert_eq!(state.stressed_days, 1);
        assert_eq!(state.over_fertilized_stress_days, 0);
    }

    #[test]
    fn test_ndvi_carries_forward_without_observation() {
        let mut state = base_state();
        state.soil_moisture = Decimal::from(52);
        // soil lands on 50: healthy but outside the moisture-reward band
        let (state, day) = step(state, date("2025-09-05"), None, None, &[]);
        assert_eq!(state.ndvi, dec("0.5"));
        assert_eq!(day.ndvi, dec("0.50"));
    }

    #[test]
    fn test_observed_ndvi_replaces_carried_value() {
        let mut state = base_state();
        state.soil_moisture = Decimal::from(52);
        let (state, _) = step(state, date("2025-09-05"), None, Some(dec("0.72")), &[]);
        assert_eq!(state.ndvi, dec("0.72"));
    }

    #[test]
    fn test_favorable_moisture_rewards_ndvi() {
        // soil 55 - 2 = 53 is outside [55, 75]; irrigate into the band
        let action = irrigate("2025-09-05", 8);
        let (state, _) = step(base_state(), date("2025-09-05"), None, None, &[&action]);
        assert_eq!(state.soil_moisture, Decimal::from(57));
        assert_eq!(state.ndvi, dec("0.51"));
    }

    #[test]
    fn test_stress_penalizes_ndvi() {
        let mut state = base_state();
        state.soil_moisture = Decimal::from(30);
        let (state, _) = step(state, date("2025-09-05"), None, None, &[]);
        assert_eq!(state.ndvi, dec("0.48"));
    }

    #[test]
    fn test_ndvi_clamped_to_band() {
        let mut state = base_state();
        state.soil_moisture = Decimal::from(30);
        state.ndvi = dec("0.31");
        let (state, _) = step(state, date("2025-09-05"), None, None, &[]);
        assert_eq!(state.ndvi, dec("0.30"));

        let mut state = base_state();
        let action = irrigate("2025-09-05", 8);
        state.ndvi = dec("0.90");
        let (state, _) = step(state, date("2025-09-05"), None, None, &[&action]);
        assert_eq!(state.ndvi, dec("0.90"));
    }

    #[test]
    fn test_window_drops_oldest_past_capacity() {
        let mut window = NdviWindow::seeded(&[dec("0.5"); 20]);
        assert_eq!(window.len(), 20);
        window.push(dec("0.9"));
        assert_eq!(window.len(), 20);
        // mean moved by (0.9 - 0.5) / 20
        assert_eq!(window.mean(), dec("0.52"));
    }

    #[test]
    fn test_single_outlier_moves_yield_by_at_most_two_points() {
        // A full window of 0.50 then one 0.90 observation: the projection
        // may move by at most round(100 * 0.40 / 20)
        let mut window = NdviWindow::seeded(&[dec("0.5"); 20]);
        let before = to_percent(window.mean());
        window.push(dec("0.9"));
        let after = to_percent(window.mean());
        assert_eq!(before, 50);
        assert_eq!(after - before, 2);
    }

    #[test]
    fn test_to_percent_rounds_half_up() {
        assert_eq!(to_percent(dec("0.505")), 51);
        assert_eq!(to_percent(dec("0.504")), 50);
        assert_eq!(to_percent(dec("0.9")), 90);
    }
}
