//! Utilization fee history management.
//!
//! History rows are appended after [`UtilizationFeeRules`] accepts them and
//! never change afterwards.

use chrono::{Local, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::fees::{AddFeeEntryCommand, AddFeeEntryResult, EffectiveFeeResult, FeeHistoryResult};
use crate::domain::common_area_service::{ensure_permitted, CommonAreaService};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::utilization_fee::{FeeEntryDraft, UtilizationFeeEntry};
use crate::domain::permissions::{Action, PermissionChecker};
use crate::domain::utilization_fee_rules::{parse_date, UtilizationFeeRules};
use crate::storage::UtilizationFeeStorage;

#[derive(Clone)]
pub struct UtilizationFeeService {
    common_area_service: CommonAreaService,
    fees: Arc<dyn UtilizationFeeStorage>,
    permissions: Arc<dyn PermissionChecker>,
    write_lock: Arc<Mutex<()>>,
}

impl UtilizationFeeService {
    pub fn new(
        common_area_service: CommonAreaService,
        fees: Arc<dyn UtilizationFeeStorage>,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        let write_lock = common_area_service.write_lock();
        Self {
            common_area_service,
            fees,
            permissions,
            write_lock,
        }
    }

    /// Full history, newest `valid_since` first
    pub async fn get_history(&self, common_area_id: &str) -> ServiceResult<FeeHistoryResult> {
        info!("Getting fee history for {}", common_area_id);
        self.common_area_service.get_common_area(common_area_id).await?;

        let mut entries = self.fees.list_fee_entries(common_area_id).await?;
        UtilizationFeeRules::sort_for_display(&mut entries);
        Ok(FeeHistoryResult { entries })
    }

    pub async fn add_fee_entry(&self, command: AddFeeEntryCommand) -> ServiceResult<AddFeeEntryResult> {
        info!("Adding fee entry: {:?}", command);
        ensure_permitted(self.permissions.as_ref(), Action::ManageFees)?;

        let _guard = self.write_lock.lock().await;
        let common_area = self.common_area_service.get_common_area(&command.common_area_id).await?;
        if !common_area.manages_fees() {
            return Err(ServiceError::NotApplicable(format!(
                "Common area {} does not charge a usage fee",
                common_area.name
            )));
        }

        let draft = FeeEntryDraft {
            common_area_id: command.common_area_id.clone(),
            value: command.value,
            valid_since: command.valid_since.clone(),
            created_by: command.created_by.trim().to_string(),
        };
        let valid_since = UtilizationFeeRules::can_add_fee_entry(&draft).map_err(|violation| {
            warn!("Rejected fee entry for {}: {}", command.common_area_id, violation);
            violation
        })?;

        if draft.created_by.is_empty() {
            return Err(ServiceError::InvalidInput("Created by cannot be empty".to_string()));
        }

        let entry = UtilizationFeeEntry {
            id: UtilizationFeeEntry::generate_id(&Uuid::new_v4().to_string()),
            common_area_id: draft.common_area_id,
            value: draft.value,
            valid_since,
            created_by: draft.created_by,
            created_at: Utc::now().to_rfc3339(),
        };

        self.fees.append_fee_entry(&entry).await?;
        info!(
            "Added fee entry {}: {:.2} valid since {}",
            entry.id, entry.value, entry.valid_since
        );

        Ok(AddFeeEntryResult {
            entry,
            success_message: "Utilization fee added successfully".to_string(),
        })
    }

    /// Fee in force on `as_of` (today when omitted)
    pub async fn get_effective_fee(&self, common_area_id: &str, as_of: Option<&str>) -> ServiceResult<EffectiveFeeResult> {
        info!("Resolving effective fee for {} as of {:?}", common_area_id, as_of);
        self.common_area_service.get_common_area(common_area_id).await?;

        let as_of = match as_of {
            Some(value) => parse_date(value)?,
            None => Local::now().date_naive(),
        };

        let history = self.fees.list_fee_entries(common_area_id).await?;
        let entry = UtilizationFeeRules::effective_fee(&history, as_of).cloned();
        Ok(EffectiveFeeResult { as_of, entry })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::common_areas::CreateCommonAreaCommand;
    use crate::domain::models::common_area::CommonAreaFlags;
    use crate::domain::permissions::StaticPermissions;
    use crate::domain::violations::RuleViolation;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::{CommonAreaRepository, UtilizationFeeRepository};

    async fn setup(has_usage_fee: bool) -> (TestEnvironment, UtilizationFeeService, String) {
        let env = TestEnvironment::new().await.unwrap();
        let permissions: Arc<dyn PermissionChecker> = Arc::new(StaticPermissions::default());
        let common_areas = CommonAreaService::new(
            Arc::new(CommonAreaRepository::new(env.connection.clone())),
            permissions.clone(),
        );
        let area = common_areas
            .create_common_area(CreateCommonAreaCommand {
                name: "Gourmet space".to_string(),
                description: None,
                capacity: None,
                flags: CommonAreaFlags {
                    does_it_require_reservation: true,
                    does_it_have_usage_fee: has_usage_fee,
                    ..Default::default()
                },
            })
            .await
            .unwrap()
            .common_area;
        let service = UtilizationFeeService::new(
            common_areas,
            Arc::new(UtilizationFeeRepository::new(env.connection.clone())),
            permissions,
        );
        (env, service, area.id)
    }

    fn command(area: &str, value: f64, valid_since: &str) -> AddFeeEntryCommand {
        AddFeeEntryCommand {
            common_area_id: area.to_string(),
            value,
            valid_since: valid_since.to_string(),
            created_by: "manager::1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_fee_entries_and_history_order() {
        let (_env, service, area) = setup(true).await;

        service.add_fee_entry(command(&area, 50.0, "2023-01-01")).await.unwrap();
        service.add_fee_entry(command(&area, 75.5, "2025-01-01")).await.unwrap();
        let result = service.add_fee_entry(command(&area, 60.0, "2024-01-01")).await.unwrap();
        assert_eq!(result.entry.value, 60.0);
        assert!(result.entry.id.starts_with("fee::"));

        let values: Vec<f64> = service.get_history(&area).await.unwrap().entries.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![75.5, 60.0, 50.0]);
    }

    #[tokio::test]
    async fn test_rule_violations_are_reported() {
        let (_env, service, area) = setup(true).await;

        let result = service.add_fee_entry(command(&area, 0.0, "2024-01-01")).await;
        assert!(matches!(result, Err(ServiceError::Rule(RuleViolation::NonPositiveValue))));

        let result = service.add_fee_entry(command(&area, 10.5, "not-a-date")).await;
        assert!(matches!(result, Err(ServiceError::Rule(RuleViolation::InvalidDate(_)))));

        assert!(service.get_history(&area).await.unwrap().entries.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_valid_since_allowed() {
        let (_env, service, area) = setup(true).await;

        service.add_fee_entry(command(&area, 10.0, "2024-01-01")).await.unwrap();
        service.add_fee_entry(command(&area, 12.0, "2024-01-01")).await.unwrap();

        assert_eq!(service.get_history(&area).await.unwrap().entries.len(), 2);
        let effective = service.get_effective_fee(&area, Some("2024-02-01")).await.unwrap();
        assert_eq!(effective.entry.unwrap().value, 12.0);
    }

    #[tokio::test]
    async fn test_effective_fee_as_of_dates() {
        let (_env, service, area) = setup(true).await;
        service.add_fee_entry(command(&area, 50.0, "2023-01-01")).await.unwrap();
        service.add_fee_entry(command(&area, 60.0, "2024-01-01")).await.unwrap();

        let before = service.get_effective_fee(&area, Some("2022-06-01")).await.unwrap();
        assert!(before.entry.is_none());

        let during = service.get_effective_fee(&area, Some("2023-12-31")).await.unwrap();
        assert_eq!(during.entry.unwrap().value, 50.0);
        assert_eq!(during.as_of.to_string(), "2023-12-31");

        let today = service.get_effective_fee(&area, None).await.unwrap();
        assert_eq!(today.entry.unwrap().value, 60.0);

        let result = service.get_effective_fee(&area, Some("June")).await;
        assert!(matches!(result, Err(ServiceError::Rule(RuleViolation::InvalidDate(_)))));
    }

    #[tokio::test]
    async fn test_fee_not_applicable_without_usage_fee() {
        let (_env, service, area) = setup(false).await;

        let result = service.add_fee_entry(command(&area, 10.0, "2024-01-01")).await;
        assert!(matches!(result, Err(ServiceError::NotApplicable(_))));
    }

    #[tokio::test]
    async fn test_created_by_required() {
        let (_env, service, area) = setup(true).await;
        let mut cmd = command(&area, 10.0, "2024-01-01");
        cmd.created_by = String::new();

        let result = service.add_fee_entry(cmd).await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_fee_rules_run_before_author_check() {
        let (_env, service, area) = setup(true).await;
        let mut cmd = command(&area, 0.0, "2024-01-01");
        cmd.created_by = "   ".to_string();

        let result = service.add_fee_entry(cmd).await;
        assert!(matches!(result, Err(ServiceError::Rule(RuleViolation::NonPositiveValue))));
    }
}
