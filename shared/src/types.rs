//! Common types used across the platform

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// Closed calendar-day interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every calendar day from `start` to `end` inclusive, in order.
    ///
    /// Callers must ensure `start <= end`; an inverted range yields nothing.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of calendar days in the interval, inclusive of both ends
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_date_range_days_inclusive() {
        let range = DateRange::new(date("2025-09-05"), date("2025-09-08"));
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(
            days,
            vec![
                date("2025-09-05"),
                date("2025-09-06"),
                date("2025-09-07"),
                date("2025-09-08"),
            ]
        );
    }

    #[test]
    fn test_date_range_single_day() {
        let range = DateRange::new(date("2025-09-05"), date("2025-09-05"));
        assert_eq!(range.days().count(), 1);
        assert_eq!(range.len_days(), 1);
    }

    #[test]
    fn test_date_range_crosses_month_boundary() {
        let range = DateRange::new(date("2025-09-29"), date("2025-10-02"));
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[1], date("2025-09-30"));
        assert_eq!(days[2], date("2025-10-01"));
    }

    #[test]
    fn test_date_range_len_matches_iteration() {
        let range = DateRange::new(date("2025-09-05"), date("2025-10-04"));
        assert_eq!(range.len_days(), 30);
        assert_eq!(range.days().count() as i64, range.len_days());
    }
}
