//! Common area registry.
//!
//! Common areas are owned by the condominium registry; this service only
//! keeps what the reservation rules need: descriptive fields and the
//! configuration flags that decide whether periods and fees apply.
//!
//! The period and fee services share this service's write lock, so a
//! configuration change never interleaves with a period or fee mutation.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::common_areas::{
    CommonAreaResult, CreateCommonAreaCommand, UpdateConfigurationCommand,
};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::common_area::CommonArea;
use crate::domain::permissions::{Action, PermissionChecker};
use crate::storage::CommonAreaStorage;

const MAX_NAME_LENGTH: usize = 128;

#[derive(Clone)]
pub struct CommonAreaService {
    storage: Arc<dyn CommonAreaStorage>,
    permissions: Arc<dyn PermissionChecker>,
    write_lock: Arc<Mutex<()>>,
}

impl CommonAreaService {
    pub fn new(storage: Arc<dyn CommonAreaStorage>, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            storage,
            permissions,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Lock held around every check-then-write touching a common area
    pub(crate) fn write_lock(&self) -> Arc<Mutex<()>> {
        self.write_lock.clone()
    }

    pub async fn create_common_area(&self, command: CreateCommonAreaCommand) -> ServiceResult<CommonAreaResult> {
        info!("Creating common area: {:?}", command);
        ensure_permitted(self.permissions.as_ref(), Action::ManageCommonAreas)?;

        let name = command.name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidInput("Common area name cannot be empty".to_string()));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ServiceError::InvalidInput(format!(
                "Common area name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }

        let now = Utc::now().to_rfc3339();
        let common_area = CommonArea {
            id: CommonArea::generate_id(&Uuid::new_v4().to_string()),
            name: name.to_string(),
            description: command
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            capacity: command.capacity,
            flags: command.flags,
            created_at: now.clone(),
            updated_at: now,
        };

        let _guard = self.write_lock.lock().await;
        self.storage.store_common_area(&common_area).await?;
        info!("Created common area {} ({})", common_area.id, common_area.name);

        Ok(CommonAreaResult {
            common_area,
            success_message: "Common area created successfully".to_string(),
        })
    }

    /// Fetch a common area, failing with `NotFound` when it does not exist
    pub async fn get_common_area(&self, common_area_id: &str) -> ServiceResult<CommonArea> {
        self.storage
            .get_common_area(common_area_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Common area", common_area_id))
    }

    pub async fn list_common_areas(&self) -> ServiceResult<Vec<CommonArea>> {
        let areas = self.storage.list_common_areas().await?;
        info!("Found {} common areas", areas.len());
        Ok(areas)
    }

    /// Replace all configuration flags at once
    pub async fn update_configuration(&self, command: UpdateConfigurationCommand) -> ServiceResult<CommonAreaResult> {
        info!("Updating configuration: {:?}", command);
        ensure_permitted(self.permissions.as_ref(), Action::ManageCommonAreas)?;

        let _guard = self.write_lock.lock().await;
        let mut common_area = self.get_common_area(&command.common_area_id).await?;
        common_area.flags = command.flags;
        common_area.updated_at = Utc::now().to_rfc3339();
        self.storage.store_common_area(&common_area).await?;

        Ok(CommonAreaResult {
            common_area,
            success_message: "Common area configuration updated successfully".to_string(),
        })
    }
}

pub(crate) fn ensure_permitted(permissions: &dyn PermissionChecker, action: Action) -> ServiceResult<()> {
    if permissions.can(action) {
        Ok(())
    } else {
        warn!("Permission denied: {}", action);
        Err(ServiceError::PermissionDenied(action.to_string()))
    }
}
