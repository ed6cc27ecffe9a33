//! Utilization fee history rules.
//!
//! The history is an append-only log: entries are never edited or removed,
//! and several entries may share the same `valid_since` date.

use chrono::{DateTime, NaiveDate};

use crate::domain::models::utilization_fee::{FeeEntryDraft, UtilizationFeeEntry};
use crate::domain::violations::RuleViolation;

pub struct UtilizationFeeRules;

impl UtilizationFeeRules {
    /// Validate a new history row, returning its parsed `valid_since` date
    pub fn can_add_fee_entry(candidate: &FeeEntryDraft) -> Result<NaiveDate, RuleViolation> {
        // NaN fails this comparison too
        if !(candidate.value > 0.0) {
            return Err(RuleViolation::NonPositiveValue);
        }
        parse_date(&candidate.valid_since)
    }

    /// The fee in force on `as_of`: latest `valid_since` not after `as_of`.
    ///
    /// When several entries share that date the most recently appended wins.
    pub fn effective_fee(history: &[UtilizationFeeEntry], as_of: NaiveDate) -> Option<&UtilizationFeeEntry> {
        history
            .iter()
            .filter(|entry| entry.valid_since <= as_of)
            .fold(None, |best: Option<&UtilizationFeeEntry>, entry| match best {
                Some(current) if current.valid_since > entry.valid_since => Some(current),
                _ => Some(entry),
            })
    }

    /// Newest `valid_since` first, appended order preserved within a date
    pub fn sort_for_display(history: &mut [UtilizationFeeEntry]) {
        history.sort_by(|a, b| b.valid_since.cmp(&a.valid_since));
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_date(value: &str) -> Result<NaiveDate, RuleViolation> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| RuleViolation::InvalidDate(value.to_string()))
}
