//! # CSV Reservation Period Repository
//!
//! Periods of every common area live in `reservation_periods.csv`:
//!
//! ```csv
//! id,common_area_id,is_full_day,start_time,end_time,is_active,created_at
//! period::1f0c...,common_area::9a1b...,false,09:00,12:00,true,2025-01-20T10:00:00Z
//! period::77de...,common_area::4c2e...,true,,,false,2025-01-21T08:00:00Z
//! ```
//!
//! Rows are never removed; deactivation rewrites the `is_active` column.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::connection::CsvConnection;
use crate::domain::models::reservation_period::ReservationPeriod;
use crate::storage::traits::ReservationPeriodStorage;

const PERIODS_FILE: &str = "reservation_periods.csv";

/// CSV record structure for periods
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PeriodRecord {
    id: String,
    common_area_id: String,
    is_full_day: bool,
    start_time: Option<String>,
    end_time: Option<String>,
    is_active: bool,
    created_at: String,
}

impl From<&ReservationPeriod> for PeriodRecord {
    fn from(period: &ReservationPeriod) -> Self {
        PeriodRecord {
            id: period.id.clone(),
            common_area_id: period.common_area_id.clone(),
            is_full_day: period.is_full_day,
            start_time: period.start_time.clone(),
            end_time: period.end_time.clone(),
            is_active: period.is_active,
            created_at: period.created_at.clone(),
        }
    }
}

impl From<PeriodRecord> for ReservationPeriod {
    fn from(record: PeriodRecord) -> Self {
        ReservationPeriod {
            id: record.id,
            common_area_id: record.common_area_id,
            is_full_day: record.is_full_day,
            start_time: record.start_time,
            end_time: record.end_time,
            is_active: record.is_active,
            has_future_reservation: false,
            created_at: record.created_at,
        }
    }
}

#[derive(Clone)]
pub struct ReservationPeriodRepository {
    connection: CsvConnection,
}

impl ReservationPeriodRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_all(&self) -> Result<Vec<PeriodRecord>> {
        self.connection.read_csv(PERIODS_FILE)
    }
}

#[async_trait]
impl ReservationPeriodStorage for ReservationPeriodRepository {
    async fn store_period(&self, period: &ReservationPeriod) -> Result<()> {
        debug!("Storing period {} for {}", period.id, period.common_area_id);
        self.connection.append_csv(PERIODS_FILE, &PeriodRecord::from(period))
    }

    async fn list_periods(&self, common_area_id: &str) -> Result<Vec<ReservationPeriod>> {
        let periods = self
            .read_all()?
            .into_iter()
            .filter(|record| record.common_area_id == common_area_id)
            .map(ReservationPeriod::from)
            .collect();
        Ok(periods)
    }

    async fn set_period_active(&self, period_id: &str, is_active: bool) -> Result<bool> {
        // The whole file is rewritten, so every row must survive the read
        let mut records: Vec<PeriodRecord> = self.connection.read_csv_strict(PERIODS_FILE)?;
        let Some(record) = records.iter_mut().find(|r| r.id == period_id) else {
            warn!("Period {} not found for activation change", period_id);
            return Ok(false);
        };

        record.is_active = is_active;
        self.connection.rewrite_csv(PERIODS_FILE, &records)?;
        info!("Period {} is_active set to {}", period_id, is_active);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    fn period(id: &str, area: &str, is_full_day: bool) -> ReservationPeriod {
        ReservationPeriod {
            id: id.to_string(),
            common_area_id: area.to_string(),
            is_full_day,
            start_time: (!is_full_day).then(|| "09:00".to_string()),
            end_time: (!is_full_day).then(|| "12:00:00".to_string()),
            is_active: true,
            has_future_reservation: false,
            created_at: "2025-01-20T10:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_list_by_common_area() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = ReservationPeriodRepository::new(env.connection.clone());

        repo.store_period(&period("period::1", "common_area::a", false)).await.unwrap();
        repo.store_period(&period("period::2", "common_area::b", true)).await.unwrap();
        repo.store_period(&period("period::3", "common_area::a", true)).await.unwrap();

        let periods = repo.list_periods("common_area::a").await.unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0], period("period::1", "common_area::a", false));
        assert_eq!(periods[1].id, "period::3");
        assert!(periods[1].start_time.is_none());
        assert!(periods[1].end_time.is_none());
    }

    #[tokio::test]
    async fn test_set_period_active() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = ReservationPeriodRepository::new(env.connection.clone());

        repo.store_period(&period("period::1", "common_area::a", false)).await.unwrap();
        repo.store_period(&period("period::2", "common_area::a", false)).await.unwrap();

        assert!(repo.set_period_active("period::1", false).await.unwrap());
        assert!(!repo.set_period_active("period::missing", false).await.unwrap());

        let periods = repo.list_periods("common_area::a").await.unwrap();
        assert!(!periods[0].is_active);
        assert!(periods[1].is_active);

        // Appends still work after a rewrite
        repo.store_period(&period("period::3", "common_area::a", false)).await.unwrap();
        assert_eq!(repo.list_periods("common_area::a").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_set_period_active_keeps_malformed_rows() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = ReservationPeriodRepository::new(env.connection.clone());
        let path = env.connection.file_path(PERIODS_FILE);
        let content = "id,common_area_id,is_full_day,start_time,end_time,is_active,created_at\n\
                       period::good,common_area::a,false,09:00,12:00,true,x\n\
                       period::odd,common_area::a,false,13:00,15:00,yes,x\n";
        std::fs::write(&path, content).unwrap();

        assert!(repo.set_period_active("period::good", false).await.is_err());

        let after = std::fs::read_to_string(&path).unwrap();
        assert_eq!(after, content);
        assert!(after.contains("period::odd"));
    }
}
