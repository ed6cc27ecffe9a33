//! # Storage Traits
//!
//! Storage abstractions used by the domain services. The services only see
//! these traits, so the CSV backend can be replaced by the condominium REST
//! API or a database without touching the rules.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::common_area::CommonArea;
use crate::domain::models::reservation::Reservation;
use crate::domain::models::reservation_period::ReservationPeriod;
use crate::domain::models::utilization_fee::UtilizationFeeEntry;

#[async_trait]
pub trait CommonAreaStorage: Send + Sync {
    /// Insert a common area, or replace the one with the same ID
    async fn store_common_area(&self, common_area: &CommonArea) -> Result<()>;

    async fn get_common_area(&self, common_area_id: &str) -> Result<Option<CommonArea>>;

    /// All common areas ordered by name
    async fn list_common_areas(&self) -> Result<Vec<CommonArea>>;
}

#[async_trait]
pub trait ReservationPeriodStorage: Send + Sync {
    async fn store_period(&self, period: &ReservationPeriod) -> Result<()>;

    /// Every period of a common area, active or not, in insertion order.
    /// `has_future_reservation` is always false here; callers derive it.
    async fn list_periods(&self, common_area_id: &str) -> Result<Vec<ReservationPeriod>>;

    /// Flip the soft-delete flag.
    /// Returns true if the period was found
    async fn set_period_active(&self, period_id: &str, is_active: bool) -> Result<bool>;
}

#[async_trait]
pub trait UtilizationFeeStorage: Send + Sync {
    async fn append_fee_entry(&self, entry: &UtilizationFeeEntry) -> Result<()>;

    /// History of a common area in the order it was appended
    async fn list_fee_entries(&self, common_area_id: &str) -> Result<Vec<UtilizationFeeEntry>>;
}

#[async_trait]
pub trait ReservationStorage: Send + Sync {
    async fn store_reservation(&self, reservation: &Reservation) -> Result<()>;

    async fn list_reservations(&self, common_area_id: &str) -> Result<Vec<Reservation>>;
}
