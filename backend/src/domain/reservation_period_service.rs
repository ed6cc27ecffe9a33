//! Reservation period management.
//!
//! Loads a snapshot of a common area's periods, runs it through
//! [`ReservationPeriodRules`], and persists accepted changes. Mutations hold
//! the lock shared with [`CommonAreaService`] so the check and the write see
//! the same snapshot, configuration flags included.

use chrono::{Local, NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::periods::{
    AddPeriodCommand, AddPeriodResult, DeactivatePeriodCommand, DeactivatePeriodResult, DescribedPeriod,
    ListPeriodsResult, RecordReservationCommand, RecordReservationResult, ValidatePeriodResult,
};
use crate::domain::common_area_service::{ensure_permitted, CommonAreaService};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::common_area::CommonArea;
use crate::domain::models::reservation::Reservation;
use crate::domain::models::reservation_period::{PeriodDraft, ReservationPeriod};
use crate::domain::permissions::{Action, PermissionChecker};
use crate::domain::reservation_period_rules::ReservationPeriodRules;
use crate::domain::utilization_fee_rules::parse_date;
use crate::storage::{ReservationPeriodStorage, ReservationStorage};

#[derive(Clone)]
pub struct ReservationPeriodService {
    common_area_service: CommonAreaService,
    periods: Arc<dyn ReservationPeriodStorage>,
    reservations: Arc<dyn ReservationStorage>,
    permissions: Arc<dyn PermissionChecker>,
    write_lock: Arc<Mutex<()>>,
}

impl ReservationPeriodService {
    pub fn new(
        common_area_service: CommonAreaService,
        periods: Arc<dyn ReservationPeriodStorage>,
        reservations: Arc<dyn ReservationStorage>,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        let write_lock = common_area_service.write_lock();
        Self {
            common_area_service,
            periods,
            reservations,
            permissions,
            write_lock,
        }
    }

    /// All periods of a common area, in display order
    pub async fn list_periods(&self, common_area_id: &str) -> ServiceResult<ListPeriodsResult> {
        info!("Listing periods for {}", common_area_id);
        self.common_area_service.get_common_area(common_area_id).await?;

        let mut periods = self.load_periods(common_area_id).await?;
        ReservationPeriodRules::sort_for_display(&mut periods);

        Ok(ListPeriodsResult {
            periods: periods.into_iter().map(describe).collect(),
        })
    }

    /// Run the add rules without storing anything
    pub async fn validate_period(&self, command: AddPeriodCommand) -> ServiceResult<ValidatePeriodResult> {
        info!("Validating period: {:?}", command);
        let common_area = self.common_area_service.get_common_area(&command.common_area_id).await?;
        ensure_manages_periods(&common_area)?;

        let existing = self.load_periods(&command.common_area_id).await?;
        let result = match ReservationPeriodRules::can_add_period(&existing, &draft_from(&command)) {
            Ok(advisories) => ValidatePeriodResult {
                violation: None,
                advisories,
            },
            Err(violation) => ValidatePeriodResult {
                violation: Some(violation),
                advisories: Vec::new(),
            },
        };
        Ok(result)
    }

    pub async fn add_period(&self, command: AddPeriodCommand) -> ServiceResult<AddPeriodResult> {
        info!("Adding period: {:?}", command);
        ensure_permitted(self.permissions.as_ref(), Action::ManagePeriods)?;

        let _guard = self.write_lock.lock().await;
        let common_area = self.common_area_service.get_common_area(&command.common_area_id).await?;
        ensure_manages_periods(&common_area)?;

        let existing = self.load_periods(&command.common_area_id).await?;
        let draft = draft_from(&command);
        let advisories = ReservationPeriodRules::can_add_period(&existing, &draft).map_err(|violation| {
            warn!("Rejected period for {}: {}", command.common_area_id, violation);
            violation
        })?;

        let period = ReservationPeriod {
            id: ReservationPeriod::generate_id(&Uuid::new_v4().to_string()),
            common_area_id: draft.common_area_id,
            is_full_day: draft.is_full_day,
            // Blank inputs on a full-day draft are stored as absent
            start_time: normalize_time(draft.start_time, draft.is_full_day),
            end_time: normalize_time(draft.end_time, draft.is_full_day),
            is_active: true,
            has_future_reservation: false,
            created_at: Utc::now().to_rfc3339(),
        };
        self.periods.store_period(&period).await?;

        let described = describe(period);
        info!("Added period {} ({})", described.period.id, described.label);
        Ok(AddPeriodResult {
            period: described,
            advisories,
            success_message: "Reservation period added successfully".to_string(),
        })
    }

    pub async fn deactivate_period(&self, command: DeactivatePeriodCommand) -> ServiceResult<DeactivatePeriodResult> {
        info!("Deactivating period: {:?}", command);
        ensure_permitted(self.permissions.as_ref(), Action::ManagePeriods)?;

        let _guard = self.write_lock.lock().await;
        self.common_area_service.get_common_area(&command.common_area_id).await?;

        let existing = self.load_periods(&command.common_area_id).await?;
        let mut period = existing
            .iter()
            .find(|p| p.id == command.period_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Reservation period", &command.period_id))?;

        if !period.is_active {
            info!("Period {} is already inactive", period.id);
            return Ok(DeactivatePeriodResult {
                period: describe(period),
                advisories: Vec::new(),
                success_message: "Reservation period was already inactive".to_string(),
            });
        }

        let advisories = ReservationPeriodRules::can_deactivate_period(&existing, &period).map_err(|violation| {
            warn!("Rejected deactivation of {}: {}", period.id, violation);
            violation
        })?;

        if !self.periods.set_period_active(&period.id, false).await? {
            return Err(ServiceError::not_found("Reservation period", &period.id));
        }
        period.is_active = false;

        Ok(DeactivatePeriodResult {
            period: describe(period),
            advisories,
            success_message: "Reservation period deactivated successfully".to_string(),
        })
    }

    /// Book an active period on a date
    pub async fn record_reservation(&self, command: RecordReservationCommand) -> ServiceResult<RecordReservationResult> {
        info!("Recording reservation: {:?}", command);
        ensure_permitted(self.permissions.as_ref(), Action::Reserve)?;

        let date = parse_date(&command.date)?;
        let reserved_by = command.reserved_by.trim();
        if reserved_by.is_empty() {
            return Err(ServiceError::InvalidInput("Reserved by cannot be empty".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let common_area = self.common_area_service.get_common_area(&command.common_area_id).await?;
        ensure_manages_periods(&common_area)?;

        let period = self
            .periods
            .list_periods(&command.common_area_id)
            .await?
            .into_iter()
            .find(|p| p.id == command.period_id)
            .ok_or_else(|| ServiceError::not_found("Reservation period", &command.period_id))?;
        if !period.is_active {
            return Err(ServiceError::InvalidInput(format!(
                "Reservation period {} is inactive",
                period.id
            )));
        }

        let reservation = Reservation {
            id: Reservation::generate_id(&Uuid::new_v4().to_string()),
            period_id: period.id,
            common_area_id: command.common_area_id,
            date,
            reserved_by: reserved_by.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.reservations.store_reservation(&reservation).await?;

        Ok(RecordReservationResult {
            reservation,
            success_message: "Reservation recorded successfully".to_string(),
        })
    }

    /// Periods of a common area with `has_future_reservation` filled in
    async fn load_periods(&self, common_area_id: &str) -> ServiceResult<Vec<ReservationPeriod>> {
        let mut periods = self.periods.list_periods(common_area_id).await?;
        let reservations = self.reservations.list_reservations(common_area_id).await?;
        mark_future_reservations(&mut periods, &reservations, Local::now().date_naive());
        Ok(periods)
    }
}

/// Flag every period that has a reservation on or after `today`
pub fn mark_future_reservations(periods: &mut [ReservationPeriod], reservations: &[Reservation], today: NaiveDate) {
    let booked: HashSet<&str> = reservations
        .iter()
        .filter(|r| r.date >= today)
        .map(|r| r.period_id.as_str())
        .collect();

    for period in periods.iter_mut() {
        period.has_future_reservation = booked.contains(period.id.as_str());
    }
}

fn ensure_manages_periods(common_area: &CommonArea) -> ServiceResult<()> {
    if common_area.manages_periods() {
        Ok(())
    } else {
        Err(ServiceError::NotApplicable(format!(
            "Common area {} does not require reservations",
            common_area.name
        )))
    }
}

fn draft_from(command: &AddPeriodCommand) -> PeriodDraft {
    PeriodDraft {
        common_area_id: command.common_area_id.clone(),
        is_full_day: command.is_full_day,
        start_time: command.start_time.clone(),
        end_time: command.end_time.clone(),
    }
}

fn normalize_time(value: Option<String>, is_full_day: bool) -> Option<String> {
    if is_full_day {
        return None;
    }
    value.map(|v| v.trim().to_string())
}

fn describe(period: ReservationPeriod) -> DescribedPeriod {
    let label = ReservationPeriodRules::describe_period(&period);
    DescribedPeriod { period, label }
}
