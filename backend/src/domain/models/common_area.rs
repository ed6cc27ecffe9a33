//! Domain model for a common area and its configuration flags.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonAreaFlags {
    pub does_it_require_reservation: bool,
    pub does_it_have_usage_fee: bool,
    pub does_it_allow_reservation_to_defaulters: bool,
    pub does_it_have_entry_checklist: bool,
    pub does_it_have_exit_checklist: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonArea {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    pub flags: CommonAreaFlags,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

impl CommonArea {
    pub fn generate_id(uuid: &str) -> String {
        format!("common_area::{}", uuid)
    }

    /// Periods only make sense for areas that are booked in advance
    pub fn manages_periods(&self) -> bool {
        self.flags.does_it_require_reservation
    }

    /// Fee history only makes sense for areas that charge for usage
    pub fn manages_fees(&self) -> bool {
        self.flags.does_it_have_usage_fee
    }
}
