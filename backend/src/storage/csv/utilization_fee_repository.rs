//! # CSV Utilization Fee Repository
//!
//! Append-only fee history in `utilization_fees.csv`:
//!
//! ```csv
//! id,common_area_id,value,valid_since,created_by,created_at
//! fee::8b1e...,common_area::9a1b...,25.0,2025-01-01,user::42,2024-12-20T09:00:00Z
//! ```

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::connection::CsvConnection;
use crate::domain::models::utilization_fee::UtilizationFeeEntry;
use crate::storage::traits::UtilizationFeeStorage;

const FEES_FILE: &str = "utilization_fees.csv";

/// CSV record structure for fee history rows
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FeeRecord {
    id: String,
    common_area_id: String,
    value: f64,
    valid_since: String,
    created_by: String,
    created_at: String,
}

impl From<&UtilizationFeeEntry> for FeeRecord {
    fn from(entry: &UtilizationFeeEntry) -> Self {
        FeeRecord {
            id: entry.id.clone(),
            common_area_id: entry.common_area_id.clone(),
            value: entry.value,
            valid_since: entry.valid_since.format("%Y-%m-%d").to_string(),
            created_by: entry.created_by.clone(),
            created_at: entry.created_at.clone(),
        }
    }
}

impl TryFrom<FeeRecord> for UtilizationFeeEntry {
    type Error = anyhow::Error;

    fn try_from(record: FeeRecord) -> Result<Self> {
        let valid_since = NaiveDate::parse_from_str(&record.valid_since, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid valid_since '{}': {}", record.valid_since, e))?;

        Ok(UtilizationFeeEntry {
            id: record.id,
            common_area_id: record.common_area_id,
            value: record.value,
            valid_since,
            created_by: record.created_by,
            created_at: record.created_at,
        })
    }
}

#[derive(Clone)]
pub struct UtilizationFeeRepository {
    connection: CsvConnection,
}

impl UtilizationFeeRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UtilizationFeeStorage for UtilizationFeeRepository {
    async fn append_fee_entry(&self, entry: &UtilizationFeeEntry) -> Result<()> {
        debug!("Appending fee entry {} for {}", entry.id, entry.common_area_id);
        self.connection.append_csv(FEES_FILE, &FeeRecord::from(entry))
    }

    async fn list_fee_entries(&self, common_area_id: &str) -> Result<Vec<UtilizationFeeEntry>> {
        let records: Vec<FeeRecord> = self.connection.read_csv(FEES_FILE)?;

        let mut entries = Vec::new();
        for record in records.into_iter().filter(|r| r.common_area_id == common_area_id) {
            match UtilizationFeeEntry::try_from(record) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!("Failed to parse fee record: {}. Skipping.", e);
                    continue;
                }
            }
        }
        Ok(entries)
    }
}
