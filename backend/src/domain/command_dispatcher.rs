//! Single entry point for form submissions.
//!
//! Each mutation arrives as a [`ReservationCommand`] variant and is routed to
//! the owning service by an exhaustive match.

use tracing::debug;

use crate::domain::commands::{CommandOutcome, ReservationCommand};
use crate::domain::errors::ServiceResult;
use crate::domain::reservation_period_service::ReservationPeriodService;
use crate::domain::utilization_fee_service::UtilizationFeeService;

#[derive(Clone)]
pub struct CommandDispatcher {
    period_service: ReservationPeriodService,
    fee_service: UtilizationFeeService,
}

impl CommandDispatcher {
    pub fn new(period_service: ReservationPeriodService, fee_service: UtilizationFeeService) -> Self {
        Self {
            period_service,
            fee_service,
        }
    }

    pub async fn execute(&self, command: ReservationCommand) -> ServiceResult<CommandOutcome> {
        debug!("Dispatching {:?}", command);
        match command {
            ReservationCommand::AddPeriod(cmd) => self.period_service.add_period(cmd).await.map(CommandOutcome::PeriodAdded),
            ReservationCommand::DeactivatePeriod(cmd) => self
                .period_service
                .deactivate_period(cmd)
                .await
                .map(CommandOutcome::PeriodDeactivated),
            ReservationCommand::AddFeeEntry(cmd) => self.fee_service.add_fee_entry(cmd).await.map(CommandOutcome::FeeEntryAdded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::common_areas::CreateCommonAreaCommand;
    use crate::domain::commands::fees::AddFeeEntryCommand;
    use crate::domain::commands::periods::{AddPeriodCommand, DeactivatePeriodCommand};
    use crate::domain::common_area_service::CommonAreaService;
    use crate::domain::errors::ServiceError;
    use crate::domain::models::common_area::CommonAreaFlags;
    use crate::domain::permissions::{PermissionChecker, StaticPermissions};
    use crate::domain::violations::RuleViolation;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::{
        CommonAreaRepository, ReservationPeriodRepository, ReservationRepository, UtilizationFeeRepository,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_each_command_reaches_its_service() {
        let env = TestEnvironment::new().await.unwrap();
        let permissions: Arc<dyn PermissionChecker> = Arc::new(StaticPermissions::default());
        let common_areas = CommonAreaService::new(
            Arc::new(CommonAreaRepository::new(env.connection.clone())),
            permissions.clone(),
        );
        let periods = ReservationPeriodService::new(
            common_areas.clone(),
            Arc::new(ReservationPeriodRepository::new(env.connection.clone())),
            Arc::new(ReservationRepository::new(env.connection.clone())),
            permissions.clone(),
        );
        let fees = UtilizationFeeService::new(
            common_areas.clone(),
            Arc::new(UtilizationFeeRepository::new(env.connection.clone())),
            permissions,
        );
        let dispatcher = CommandDispatcher::new(periods, fees);

        let area = common_areas
            .create_common_area(CreateCommonAreaCommand {
                name: "Sports court".to_string(),
                description: None,
                capacity: None,
                flags: CommonAreaFlags {
                    does_it_require_reservation: true,
                    does_it_have_usage_fee: true,
                    ..Default::default()
                },
            })
            .await
            .unwrap()
            .common_area
            .id;

        let outcome = dispatcher
            .execute(ReservationCommand::AddPeriod(AddPeriodCommand {
                common_area_id: area.clone(),
                is_full_day: false,
                start_time: Some("08:00".to_string()),
                end_time: Some("10:00".to_string()),
            }))
            .await
            .unwrap();
        let period_id = match outcome {
            CommandOutcome::PeriodAdded(result) => result.period.period.id,
            other => panic!("unexpected outcome: {:?}", other),
        };

        let outcome = dispatcher
            .execute(ReservationCommand::DeactivatePeriod(DeactivatePeriodCommand {
                common_area_id: area.clone(),
                period_id,
            }))
            .await
            .unwrap();
        assert!(matches!(outcome, CommandOutcome::PeriodDeactivated(ref r) if !r.period.period.is_active));

        let outcome = dispatcher
            .execute(ReservationCommand::AddFeeEntry(AddFeeEntryCommand {
                common_area_id: area.clone(),
                value: 35.0,
                valid_since: "2024-01-01".to_string(),
                created_by: "manager::1".to_string(),
            }))
            .await
            .unwrap();
        assert!(matches!(outcome, CommandOutcome::FeeEntryAdded(_)));

        let result = dispatcher
            .execute(ReservationCommand::AddFeeEntry(AddFeeEntryCommand {
                common_area_id: area,
                value: -1.0,
                valid_since: "2024-01-01".to_string(),
                created_by: "manager::1".to_string(),
            }))
            .await;
        assert!(matches!(result, Err(ServiceError::Rule(RuleViolation::NonPositiveValue))));
    }
}
