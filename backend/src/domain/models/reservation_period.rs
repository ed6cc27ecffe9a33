//! Domain model for a common area's reservation periods.
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationPeriod {
    pub id: String,
    pub common_area_id: String,
    pub is_full_day: bool,
    pub start_time: Option<String>, // HH:MM[:SS]
    pub end_time: Option<String>,   // HH:MM[:SS]
    pub is_active: bool,
    /// Derived from stored reservations, never persisted
    pub has_future_reservation: bool,
    pub created_at: String, // RFC 3339 timestamp
}

impl ReservationPeriod {
    pub fn generate_id(uuid: &str) -> String {
        format!("period::{}", uuid)
    }

    /// Start time as a comparable value, `None` for full-day or malformed periods
    pub fn parsed_start(&self) -> Option<NaiveTime> {
        if self.is_full_day {
            return None;
        }
        self.start_time.as_deref().and_then(parse_time_of_day)
    }
}

/// A period that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodDraft {
    pub common_area_id: String,
    pub is_full_day: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl PeriodDraft {
    pub fn full_day(common_area_id: &str) -> Self {
        Self {
            common_area_id: common_area_id.to_string(),
            is_full_day: true,
            start_time: None,
            end_time: None,
        }
    }

    pub fn timed(common_area_id: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            common_area_id: common_area_id.to_string(),
            is_full_day: false,
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
        }
    }
}

/// Parse a wall-clock value in `HH:MM` or `HH:MM:SS` form
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day_accepts_both_granularities() {
        assert_eq!(parse_time_of_day("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_time_of_day("09:30:15"), NaiveTime::from_hms_opt(9, 30, 15));
        assert_eq!(parse_time_of_day(" 18:00 "), NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(parse_time_of_day("25:00"), None);
        assert_eq!(parse_time_of_day("noon"), None);
        assert_eq!(parse_time_of_day(""), None);
    }

    #[test]
    fn test_parsed_start_ignores_times_on_full_day_periods() {
        let period = ReservationPeriod {
            id: ReservationPeriod::generate_id("a"),
            common_area_id: "common_area::1".to_string(),
            is_full_day: true,
            start_time: Some("08:00".to_string()),
            end_time: Some("10:00".to_string()),
            is_active: true,
            has_future_reservation: false,
            created_at: String::new(),
        };
        assert_eq!(period.id, "period::a");
        assert!(period.parsed_start().is_none());
    }
}
