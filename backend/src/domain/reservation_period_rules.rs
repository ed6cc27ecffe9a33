//! Reservation period rules.
//!
//! Pure decisions over an immutable snapshot of a common area's periods. The
//! caller fetches the snapshot, asks these rules, and persists on success.
//! Nothing here touches storage, so the same checks can run on the client
//! side for instant feedback and on the server side for enforcement.
//!
//! ## Business Rules
//!
//! - Full-day periods have no start/end; timed periods need both
//! - At most one active full-day period per common area
//! - Active full-day and active timed periods never coexist
//! - A period with reservations today or later cannot be deactivated
//! - Start after end is only an advisory (overnight spans are allowed)
//! - Timed periods may overlap each other

use std::cmp::Ordering;

use chrono::NaiveTime;

use crate::domain::models::reservation_period::{parse_time_of_day, PeriodDraft, ReservationPeriod};
use crate::domain::violations::{Advisory, RuleViolation};

/// Label shown for every full-day period
pub const FULL_DAY_LABEL: &str = "Full day";

pub struct ReservationPeriodRules;

impl ReservationPeriodRules {
    /// Decide whether `candidate` may be added next to `existing`.
    ///
    /// Checks run in a fixed order and the first failure wins. Inactive
    /// periods in `existing` are ignored.
    pub fn can_add_period(
        existing: &[ReservationPeriod],
        candidate: &PeriodDraft,
    ) -> Result<Vec<Advisory>, RuleViolation> {
        let times = Self::check_shape(candidate)?;

        let mut active = existing.iter().filter(|p| p.is_active);
        if candidate.is_full_day {
            let (has_timed, has_full_day) = active.fold((false, false), |(timed, full), p| {
                (timed || !p.is_full_day, full || p.is_full_day)
            });
            if has_timed {
                return Err(RuleViolation::FullDayConflictsWithTimedPeriods);
            }
            if has_full_day {
                return Err(RuleViolation::FullDayPeriodAlreadyExists);
            }
            return Ok(Vec::new());
        }

        if active.any(|p| p.is_full_day) {
            return Err(RuleViolation::TimedConflictsWithFullDayPeriod);
        }

        let mut advisories = Vec::new();
        if let Some((start, end)) = times {
            if start >= end {
                advisories.push(Advisory::SuspiciousTimeOrder {
                    start_time: short_time(candidate.start_time.as_deref().unwrap_or_default()),
                    end_time: short_time(candidate.end_time.as_deref().unwrap_or_default()),
                });
            }
        }
        Ok(advisories)
    }

    /// Decide whether `period` may be deactivated.
    ///
    /// `existing` is the full period set of the same common area and is only
    /// used to detect that `period` is the last active one.
    pub fn can_deactivate_period(
        existing: &[ReservationPeriod],
        period: &ReservationPeriod,
    ) -> Result<Vec<Advisory>, RuleViolation> {
        if period.has_future_reservation {
            return Err(RuleViolation::HasFutureReservations);
        }

        let others_active = existing.iter().any(|p| p.is_active && p.id != period.id);
        if period.is_active && !others_active {
            return Ok(vec![Advisory::LastPeriodWarning]);
        }
        Ok(Vec::new())
    }

    /// Human-readable label: "Full day" or `HH:MM–HH:MM`
    pub fn describe_period(period: &ReservationPeriod) -> String {
        if period.is_full_day {
            return FULL_DAY_LABEL.to_string();
        }
        format!(
            "{}–{}",
            short_time(period.start_time.as_deref().unwrap_or_default()),
            short_time(period.end_time.as_deref().unwrap_or_default())
        )
    }

    /// Display order: full-day periods first, then timed periods by start time.
    ///
    /// Timed periods whose start cannot be parsed go last. Ties fall back to
    /// end time and then id so the order is stable across requests.
    pub fn compare_for_display(a: &ReservationPeriod, b: &ReservationPeriod) -> Ordering {
        match (a.is_full_day, b.is_full_day) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        let key = |p: &ReservationPeriod| {
            let start = p.parsed_start();
            let end = p.end_time.as_deref().and_then(parse_time_of_day);
            (start.is_none(), start, end)
        };
        key(a).cmp(&key(b)).then_with(|| a.id.cmp(&b.id))
    }

    pub fn sort_for_display(periods: &mut [ReservationPeriod]) {
        periods.sort_by(Self::compare_for_display);
    }

    /// Returns the parsed (start, end) pair for timed drafts
    fn check_shape(candidate: &PeriodDraft) -> Result<Option<(NaiveTime, NaiveTime)>, RuleViolation> {
        let start = non_empty(candidate.start_time.as_deref());
        let end = non_empty(candidate.end_time.as_deref());

        if candidate.is_full_day {
            if start.is_some() || end.is_some() {
                return Err(RuleViolation::ShapeMismatch(
                    "full-day periods cannot have start or end times".to_string(),
                ));
            }
            return Ok(None);
        }

        let start = start.ok_or_else(|| RuleViolation::ShapeMismatch("start time is required".to_string()))?;
        let end = end.ok_or_else(|| RuleViolation::ShapeMismatch("end time is required".to_string()))?;
        let parsed_start = parse_time_of_day(start).ok_or_else(|| {
            RuleViolation::ShapeMismatch(format!("start time '{}' is not a valid HH:MM time", start))
        })?;
        let parsed_end = parse_time_of_day(end).ok_or_else(|| {
            RuleViolation::ShapeMismatch(format!("end time '{}' is not a valid HH:MM time", end))
        })?;

        Ok(Some((parsed_start, parsed_end)))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Strip seconds: "09:30:00" -> "09:30"
fn short_time(raw: &str) -> String {
    match parse_time_of_day(raw) {
        Some(time) => time.format("%H:%M").to_string(),
        None => raw.trim().split(':').take(2).collect::<Vec<_>>().join(":"),
    }
}
