//! Point scoring and badge awards
//!
//! Runs once over the finished timeline and final run counters; never feeds
//! back into the daily loop.

use crate::models::{Action, ActionKind, Badge, CropCondition, DayResult};
use crate::simulation::engine::SimulationState;

/// Evaluate the completed run into a point total and badge awards.
pub(crate) fn evaluate(
    timeline: &[DayResult],
    state: &SimulationState,
    actions: &[Action],
) -> (u32, Vec<Badge>) {
    let mut points = i64::from(state.healthy_days);

    let first_yield = timeline.first().map(|d| d.yield_projection).unwrap_or(0);
    let final_yield = timeline.last().map(|d| d.yield_projection).unwrap_or(0);
    if final_yield - first_yield >= 5 {
        points += 2;
    }
    if state.over_fertilized_stress_days >= 2 {
        points -= 2;
    }
    let points = points.max(0) as u32;

    let mut badges = Vec::new();

    let irrigation_count = actions
        .iter()
        .filter(|a| a.kind == ActionKind::Irrigate)
        .count();
    let drought_stress_days = timeline
        .iter()
        .filter(|d| d.condition == CropCondition::Stressed && d.soil_moisture < 45)
        .count();
    if irrigation_count <= 2 && drought_stress_days == 0 {
        badges.push(Badge::WaterWise);
    }

    let max_nutrients = timeline.iter().map(|d| d.nutrients).max().unwrap_or(0);
    if max_nutrients <= 90 {
        badges.push(Badge::BalancedFeed);
    }

    // Stressed day followed by two recovering days and a healthy one. The
    // scan covers pattern start indices 0..=len-4 only.
    let recovered = state.stressed_days > 0
        && timeline.windows(4).any(|w| {
            w[0].condition == CropCondition::Stressed
                && w[1].condition == CropCondition::Recovering
                && w[2].condition == CropCondition::Recovering
                && w[3].condition == CropCondition::Healthy
        });
    if recovered {
        badges.push(Badge::Resilience);
    }

    (points, badges)
}
