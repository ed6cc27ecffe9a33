use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A booking against a reservation period on a specific date.
///
/// Only the parts needed to derive `has_future_reservation` are modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub period_id: String,
    pub common_area_id: String,
    pub date: NaiveDate,
    pub reserved_by: String,
    pub created_at: String,
}

impl Reservation {
    pub fn generate_id(uuid: &str) -> String {
        format!("reservation::{}", uuid)
    }
}
