//! # CSV Reservation Repository
//!
//! Bookings in `reservations.csv`. They are only read to work out which
//! periods still have reservations today or later.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::connection::CsvConnection;
use crate::domain::models::reservation::Reservation;
use crate::storage::traits::ReservationStorage;

const RESERVATIONS_FILE: &str = "reservations.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReservationRecord {
    id: String,
    period_id: String,
    common_area_id: String,
    date: String,
    reserved_by: String,
    created_at: String,
}

impl From<&Reservation> for ReservationRecord {
    fn from(reservation: &Reservation) -> Self {
        ReservationRecord {
            id: reservation.id.clone(),
            period_id: reservation.period_id.clone(),
            common_area_id: reservation.common_area_id.clone(),
            date: reservation.date.format("%Y-%m-%d").to_string(),
            reserved_by: reservation.reserved_by.clone(),
            created_at: reservation.created_at.clone(),
        }
    }
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = anyhow::Error;

    fn try_from(record: ReservationRecord) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid reservation date '{}': {}", record.date, e))?;
        Ok(Reservation {
            id: record.id,
            period_id: record.period_id,
            common_area_id: record.common_area_id,
            date,
            reserved_by: record.reserved_by,
            created_at: record.created_at,
        })
    }
}

#[derive(Clone)]
pub struct ReservationRepository {
    connection: CsvConnection,
}

impl ReservationRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ReservationStorage for ReservationRepository {
    async fn store_reservation(&self, reservation: &Reservation) -> Result<()> {
        debug!("Storing reservation {} for period {}", reservation.id, reservation.period_id);
        self.connection.append_csv(RESERVATIONS_FILE, &ReservationRecord::from(reservation))
    }

    async fn list_reservations(&self, common_area_id: &str) -> Result<Vec<Reservation>> {
        // A skipped booking would let its period be deactivated, so bad rows are errors
        let records: Vec<ReservationRecord> = self.connection.read_csv_strict(RESERVATIONS_FILE)?;
        records
            .into_iter()
            .filter(|r| r.common_area_id == common_area_id)
            .map(|record| {
                Reservation::try_from(record).map_err(|e| {
                    warn!("Failed to parse reservation record: {}", e);
                    e
                })
            })
            .collect()
    }
}
