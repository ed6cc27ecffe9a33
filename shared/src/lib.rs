//! Wire types exchanged between the reservation backend and its clients.
//!
//! Field names follow the JSON shape the condominium front-end already speaks:
//! camelCase for periods and common areas, and `fk_common_area` for the
//! owning common area of a fee history row.

use serde::{Deserialize, Serialize};

/// A bookable time slot of a common area.
///
/// Period ID in format: "period::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPeriod {
    pub id: String,
    pub common_area_id: String,
    pub is_full_day: bool,
    /// Wall-clock start (`HH:MM[:SS]`), absent for full-day periods
    pub start_time: Option<String>,
    /// Wall-clock end (`HH:MM[:SS]`), absent for full-day periods
    pub end_time: Option<String>,
    pub is_active: bool,
    /// True when a reservation exists for this period today or later
    #[serde(default)]
    pub has_future_reservation: bool,
}

/// A period together with its display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribedPeriod {
    #[serde(flatten)]
    pub period: ReservationPeriod,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPeriodsResponse {
    pub periods: Vec<DescribedPeriod>,
}

/// Request body for adding (or dry-run validating) a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPeriodRequest {
    pub is_full_day: bool,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// Non-blocking condition the caller may want to confirm with the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryDto {
    pub code: String,
    pub message: String,
}

/// A rejected rule, as reported by the validate endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationDto {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPeriodResponse {
    pub period: DescribedPeriod,
    pub advisories: Vec<AdvisoryDto>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePeriodResponse {
    pub is_valid: bool,
    pub violation: Option<ViolationDto>,
    pub advisories: Vec<AdvisoryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivatePeriodResponse {
    pub period: DescribedPeriod,
    pub advisories: Vec<AdvisoryDto>,
    pub success_message: String,
}

/// A booking made against a period on a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub period_id: String,
    pub common_area_id: String,
    /// Reserved date (YYYY-MM-DD)
    pub date: String,
    pub reserved_by: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReservationRequest {
    pub date: String,
    pub reserved_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReservationResponse {
    pub reservation: Reservation,
    pub success_message: String,
}

/// One row of a common area's utilization fee history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationFeeEntry {
    pub id: String,
    #[serde(rename = "fk_common_area")]
    pub common_area_id: String,
    pub value: f64,
    /// Date from which the fee applies (YYYY-MM-DD)
    #[serde(rename = "validSince")]
    pub valid_since: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFeeEntryRequest {
    pub value: f64,
    #[serde(rename = "validSince")]
    pub valid_since: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFeeEntryResponse {
    pub entry: UtilizationFeeEntry,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeHistoryResponse {
    pub entries: Vec<UtilizationFeeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EffectiveFeeQuery {
    /// Defaults to today when omitted
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveFeeResponse {
    pub as_of: String,
    pub entry: Option<UtilizationFeeEntry>,
}

/// Configuration flags of a common area; omitted flags read as `false`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonAreaConfiguration {
    pub does_it_require_reservation: bool,
    pub does_it_have_usage_fee: bool,
    pub does_it_allow_reservation_to_defaulters: bool,
    pub does_it_have_entry_checklist: bool,
    pub does_it_have_exit_checklist: bool,
}

/// Common area ID in format: "common_area::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonArea {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    #[serde(flatten)]
    pub configuration: CommonAreaConfiguration,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommonAreaRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(flatten)]
    pub configuration: CommonAreaConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonAreaResponse {
    pub common_area: CommonArea,
    pub success_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonAreaListResponse {
    pub common_areas: Vec<CommonArea>,
}

/// Body returned for every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
