//! Domain model for the utilization fee history of a common area.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationFeeEntry {
    pub id: String,
    pub common_area_id: String,
    pub value: f64,
    pub valid_since: NaiveDate,
    pub created_by: String,
    pub created_at: String, // RFC 3339 timestamp
}

impl UtilizationFeeEntry {
    pub fn generate_id(uuid: &str) -> String {
        format!("fee::{}", uuid)
    }
}

/// A fee history row as typed in by a user, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct FeeEntryDraft {
    pub common_area_id: String,
    pub value: f64,
    pub valid_since: String,
    pub created_by: String,
}
