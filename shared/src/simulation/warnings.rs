//! Pre-simulation schedule conflict scan
//!
//! Runs once over the supplied action list and weather history before any
//! day is simulated, so scheduling conflicts surface regardless of how the
//! daily dynamics play out.

use rust_decimal::Decimal;

use crate::models::{Action, ActionKind, WeatherRecord};

/// Scan the full schedule for agronomic conflicts.
///
/// Two rules:
/// - more than 3 fertilize actions inside any ±10-day window raises a single
///   leaching-risk warning, emitted at most once;
/// - each irrigate action falling on a day with >= 8mm forecast rain raises
///   its own warning.
pub(crate) fn scan_actions(actions: &[Action], weather_history: &[WeatherRecord]) -> Vec<String> {
    let mut warnings = Vec::new();

    let fertilize: Vec<&Action> = actions
        .iter()
        .filter(|a| a.kind == ActionKind::Fertilize)
        .collect();
    let leaching_risk = fertilize.iter().any(|a| {
        fertilize
            .iter()
            .filter(|b| (b.date - a.date).num_days().abs() <= 10)
            .count()
            > 3
    });
    if leaching_risk {
        warnings.push("High leaching risk; yields may drop despite high nutrients.".to_string());
    }

    for action in actions.iter().filter(|a| a.kind == ActionKind::Irrigate) {
        let rain_expected = weather_history
            .iter()
            .any(|w| w.date == action.date && w.precipitation_mm >= Decimal::from(8));
        if rain_expected {
            warnings.push(format!(
                "Rain expected on {}; consider skipping irrigation.",
                action.date
            ));
        }
    }

    warnings
}
