//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod common_areas {
    use crate::domain::models::common_area::{CommonArea, CommonAreaFlags};

    /// Input for registering a new common area.
    #[derive(Debug, Clone)]
    pub struct CreateCommonAreaCommand {
        pub name: String,
        pub description: Option<String>,
        pub capacity: Option<u32>,
        pub flags: CommonAreaFlags,
    }

    /// Input for replacing the configuration flags of a common area.
    #[derive(Debug, Clone)]
    pub struct UpdateConfigurationCommand {
        pub common_area_id: String,
        pub flags: CommonAreaFlags,
    }

    #[derive(Debug, Clone)]
    pub struct CommonAreaResult {
        pub common_area: CommonArea,
        pub success_message: String,
    }
}

pub mod periods {
    use crate::domain::models::reservation::Reservation;
    use crate::domain::models::reservation_period::ReservationPeriod;
    use crate::domain::violations::{Advisory, RuleViolation};

    /// Input for adding a period to a common area.
    #[derive(Debug, Clone)]
    pub struct AddPeriodCommand {
        pub common_area_id: String,
        pub is_full_day: bool,
        pub start_time: Option<String>,
        pub end_time: Option<String>,
    }

    /// Input for soft-deleting a period.
    #[derive(Debug, Clone)]
    pub struct DeactivatePeriodCommand {
        pub common_area_id: String,
        pub period_id: String,
    }

    /// Input for booking a period on a date.
    #[derive(Debug, Clone)]
    pub struct RecordReservationCommand {
        pub common_area_id: String,
        pub period_id: String,
        pub date: String,
        pub reserved_by: String,
    }

    /// A period with its display label.
    #[derive(Debug, Clone)]
    pub struct DescribedPeriod {
        pub period: ReservationPeriod,
        pub label: String,
    }

    #[derive(Debug, Clone)]
    pub struct ListPeriodsResult {
        pub periods: Vec<DescribedPeriod>,
    }

    #[derive(Debug, Clone)]
    pub struct AddPeriodResult {
        pub period: DescribedPeriod,
        pub advisories: Vec<Advisory>,
        pub success_message: String,
    }

    /// Result of a dry-run check; nothing is stored.
    #[derive(Debug, Clone)]
    pub struct ValidatePeriodResult {
        pub violation: Option<RuleViolation>,
        pub advisories: Vec<Advisory>,
    }

    #[derive(Debug, Clone)]
    pub struct DeactivatePeriodResult {
        pub period: DescribedPeriod,
        pub advisories: Vec<Advisory>,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct RecordReservationResult {
        pub reservation: Reservation,
        pub success_message: String,
    }
}

pub mod fees {
    use chrono::NaiveDate;

    use crate::domain::models::utilization_fee::UtilizationFeeEntry;

    /// Input for appending a row to the fee history.
    #[derive(Debug, Clone)]
    pub struct AddFeeEntryCommand {
        pub common_area_id: String,
        pub value: f64,
        pub valid_since: String,
        pub created_by: String,
    }

    #[derive(Debug, Clone)]
    pub struct AddFeeEntryResult {
        pub entry: UtilizationFeeEntry,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct FeeHistoryResult {
        pub entries: Vec<UtilizationFeeEntry>,
    }

    #[derive(Debug, Clone)]
    pub struct EffectiveFeeResult {
        pub as_of: NaiveDate,
        pub entry: Option<UtilizationFeeEntry>,
    }
}

use fees::{AddFeeEntryCommand, AddFeeEntryResult};
use periods::{AddPeriodCommand, AddPeriodResult, DeactivatePeriodCommand, DeactivatePeriodResult};

/// Every mutation a form submission can trigger
#[derive(Debug, Clone)]
pub enum ReservationCommand {
    AddPeriod(AddPeriodCommand),
    DeactivatePeriod(DeactivatePeriodCommand),
    AddFeeEntry(AddFeeEntryCommand),
}

#[derive(Debug, Clone)]
pub enum CommandOutcome {
    PeriodAdded(AddPeriodResult),
    PeriodDeactivated(DeactivatePeriodResult),
    FeeEntryAdded(AddFeeEntryResult),
}
