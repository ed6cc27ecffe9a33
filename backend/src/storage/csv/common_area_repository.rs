//! # YAML Common Area Repository
//!
//! All common areas are kept in a single `common_areas.yaml` document. The
//! list is small (a condominium has a handful of shared spaces), so every
//! write rewrites the file atomically.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::domain::models::common_area::CommonArea;
use crate::storage::traits::CommonAreaStorage;

const COMMON_AREAS_FILE: &str = "common_areas.yaml";

#[derive(Clone)]
pub struct CommonAreaRepository {
    connection: CsvConnection,
}

impl CommonAreaRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_all(&self) -> Result<Vec<CommonArea>> {
        Ok(self
            .connection
            .read_yaml::<Vec<CommonArea>>(COMMON_AREAS_FILE)?
            .unwrap_or_default())
    }
}

#[async_trait]
impl CommonAreaStorage for CommonAreaRepository {
    async fn store_common_area(&self, common_area: &CommonArea) -> Result<()> {
        let mut areas = self.read_all()?;
        match areas.iter_mut().find(|a| a.id == common_area.id) {
            Some(existing) => {
                debug!("Replacing common area {}", common_area.id);
                *existing = common_area.clone();
            }
            None => {
                info!("Adding common area {} ({})", common_area.id, common_area.name);
                areas.push(common_area.clone());
            }
        }
        self.connection.write_yaml(COMMON_AREAS_FILE, &areas)
    }

    async fn get_common_area(&self, common_area_id: &str) -> Result<Option<CommonArea>> {
        Ok(self.read_all()?.into_iter().find(|a| a.id == common_area_id))
    }

    async fn list_common_areas(&self) -> Result<Vec<CommonArea>> {
        let mut areas = self.read_all()?;
        areas.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(areas)
    }
}
