//! Outcomes of the reservation and fee rules.
//!
//! A [`RuleViolation`] rejects the operation. An [`Advisory`] never does; the
//! caller decides whether to ask the user for confirmation.

/// Hard rejection of a proposed period or fee entry
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleViolation {
    #[error("Invalid period shape: {0}")]
    ShapeMismatch(String),
    #[error("A full-day period cannot be added while timed periods are active")]
    FullDayConflictsWithTimedPeriods,
    #[error("A timed period cannot be added while a full-day period is active")]
    TimedConflictsWithFullDayPeriod,
    #[error("The common area already has an active full-day period")]
    FullDayPeriodAlreadyExists,
    #[error("The period has reservations on or after today and cannot be deactivated")]
    HasFutureReservations,
    #[error("Fee value must be positive")]
    NonPositiveValue,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl RuleViolation {
    /// Stable machine-readable code used in API payloads
    pub fn code(&self) -> &'static str {
        match self {
            RuleViolation::ShapeMismatch(_) => "shape_mismatch",
            RuleViolation::FullDayConflictsWithTimedPeriods => "full_day_conflicts_with_timed_periods",
            RuleViolation::TimedConflictsWithFullDayPeriod => "timed_conflicts_with_full_day_period",
            RuleViolation::FullDayPeriodAlreadyExists => "full_day_period_already_exists",
            RuleViolation::HasFutureReservations => "has_future_reservations",
            RuleViolation::NonPositiveValue => "non_positive_value",
            RuleViolation::InvalidDate(_) => "invalid_date",
        }
    }
}

/// Condition worth surfacing to the user that does not block the operation
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// Start is not before end; legitimate for overnight periods
    SuspiciousTimeOrder { start_time: String, end_time: String },
    /// Deactivating this period leaves the common area without bookable periods
    LastPeriodWarning,
}

impl Advisory {
    pub fn code(&self) -> &'static str {
        match self {
            Advisory::SuspiciousTimeOrder { .. } => "suspicious_time_order",
            Advisory::LastPeriodWarning => "last_period_warning",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Advisory::SuspiciousTimeOrder { start_time, end_time } => format!(
                "Start time {} is not before end time {}; the period will span midnight",
                start_time, end_time
            ),
            Advisory::LastPeriodWarning => {
                "This is the only active period; the common area will no longer accept reservations".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_codes_are_snake_case() {
        assert_eq!(RuleViolation::HasFutureReservations.code(), "has_future_reservations");
        assert_eq!(RuleViolation::InvalidDate("x".into()).code(), "invalid_date");
        assert_eq!(
            RuleViolation::ShapeMismatch("start time is required".into()).to_string(),
            "Invalid period shape: start time is required"
        );
    }

    #[test]
    fn test_advisory_message_mentions_times() {
        let advisory = Advisory::SuspiciousTimeOrder {
            start_time: "22:00".to_string(),
            end_time: "02:00".to_string(),
        };
        assert_eq!(advisory.code(), "suspicious_time_order");
        assert!(advisory.message().contains("22:00"));
        assert!(advisory.message().contains("02:00"));
    }
}
