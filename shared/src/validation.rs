//! Validation utilities for the Farm Navigator platform
//!
//! The simulation engine itself never fails over well-formed inputs; these
//! validators guard its preconditions at the call boundary.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Action, NdviRecord};
use crate::types::DateRange;

// ============================================================================
// Simulation Boundary Validations
// ============================================================================

/// Validate that a simulation range is well-ordered
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> Result<(), &'static str> {
    if from > to {
        return Err("Range start must not be after range end");
    }
    Ok(())
}

/// Validate that an NDVI history can seed the baseline window
pub fn validate_ndvi_history(history: &[NdviRecord]) -> Result<(), &'static str> {
    if history.is_empty() {
        return Err("NDVI history must not be empty");
    }
    for record in history {
        validate_ndvi_value(record.ndvi)?;
    }
    Ok(())
}

/// Validate a raw NDVI observation value
pub fn validate_ndvi_value(ndvi: Decimal) -> Result<(), &'static str> {
    if ndvi < Decimal::ZERO || ndvi > Decimal::ONE {
        return Err("NDVI must be between 0 and 1");
    }
    Ok(())
}

/// Validate one scheduled action against the simulation range
pub fn validate_action(action: &Action, range: &DateRange) -> Result<(), &'static str> {
    if action.amount < Decimal::ZERO {
        return Err("Action amount cannot be negative");
    }
    if action.date < range.start || action.date > range.end {
        return Err("Action date must fall within the simulated range");
    }
    Ok(())
}

/// Validate a whole action schedule against the simulation range
pub fn validate_actions(actions: &[Action], range: &DateRange) -> Result<(), &'static str> {
    for action in actions {
        validate_action(action, range)?;
    }
    Ok(())
}

// ============================================================================
// Photo Analysis Validations
// ============================================================================

/// Validate a photo-analysis health score
pub fn validate_health_score(score: i32) -> Result<(), &'static str> {
    if !(0..=100).contains(&score) {
        return Err("Health score must be between 0 and 100");
    }
    Ok(())
}

/// Validate a photo-analysis confidence value
pub fn validate_confidence(confidence: f32) -> Result<(), &'static str> {
    if !(0.0..=1.0).contains(&confidence) {
        return Err("Confidence must be between 0 and 1");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionKind;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::new(date(from), date(to))
    }

    fn action(on: &str, kind: ActionKind, amount: i64) -> Action {
        Action {
            date: date(on),
            kind,
            amount: Decimal::from(amount),
        }
    }

    #[test]
    fn test_validate_date_range_ordered() {
        assert!(validate_date_range(date("2025-09-05"), date("2025-10-04")).is_ok());
        assert!(validate_date_range(date("2025-09-05"), date("2025-09-05")).is_ok());
    }

    #[test]
    fn test_validate_date_range_inverted() {
        assert!(validate_date_range(date("2025-10-04"), date("2025-09-05")).is_err());
    }

    #[test]
    fn test_validate_ndvi_history_empty() {
        assert!(validate_ndvi_history(&[]).is_err());
    }

    #[test]
    fn test_validate_ndvi_history_valid() {
        let history = vec![NdviRecord {
            date: date("2025-09-01"),
            ndvi: Decimal::new(55, 2),
        }];
        assert!(validate_ndvi_history(&history).is_ok());
    }

    #[test]
    fn test_validate_ndvi_value_bounds() {
        assert!(validate_ndvi_value(Decimal::ZERO).is_ok());
        assert!(validate_ndvi_value(Decimal::ONE).is_ok());
        assert!(validate_ndvi_value(Decimal::new(55, 2)).is_ok());
        assert!(validate_ndvi_value(Decimal::new(-1, 2)).is_err());
        assert!(validate_ndvi_value(Decimal::new(101, 2)).is_err());
    }

    #[test]
    fn test_validate_action_negative_amount() {
        let a = action("2025-09-10", ActionKind::Irrigate, -5);
        assert!(validate_action(&a, &range("2025-09-05", "2025-10-04")).is_err());
    }

    #[test]
    fn test_validate_action_zero_amount_allowed() {
        let a = action("2025-09-10", ActionKind::Fertilize, 0);
        assert!(validate_action(&a, &range("2025-09-05", "2025-10-04")).is_ok());
    }

    #[test]
    fn test_validate_action_outside_range() {
        let a = action("2025-11-01", ActionKind::Irrigate, 10);
        assert!(validate_action(&a, &range("2025-09-05", "2025-10-04")).is_err());
        let a = action("2025-09-04", ActionKind::Irrigate, 10);
        assert!(validate_action(&a, &range("2025-09-05", "2025-10-04")).is_err());
    }

    #[test]
    fn test_validate_actions_reports_first_failure() {
        let r = range("2025-09-05", "2025-10-04");
        let actions = vec![
            action("2025-09-10", ActionKind::Irrigate, 10),
            action("2025-09-11", ActionKind::Fertilize, -1),
        ];
        assert!(validate_actions(&actions, &r).is_err());
    }

    #[test]
    fn test_validate_health_score() {
        assert!(validate_health_score(0).is_ok());
        assert!(validate_health_score(100).is_ok());
        assert!(validate_health_score(-1).is_err());
        assert!(validate_health_score(101).is_err());
    }

    #[test]
    fn test_validate_confidence() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(0.85).is_ok());
        assert!(validate_confidence(1.0).is_ok());
        assert!(validate_confidence(1.1).is_err());
    }
}
