use shared::{AddFeeEntryRequest, AddFeeEntryResponse, EffectiveFeeResponse, FeeHistoryResponse, UtilizationFeeEntry};

use crate::domain::commands::fees::{AddFeeEntryCommand, AddFeeEntryResult, EffectiveFeeResult, FeeHistoryResult};
use crate::domain::models::utilization_fee::UtilizationFeeEntry as DomainFeeEntry;

pub struct FeeMapper;

impl FeeMapper {
    pub fn to_dto(domain: DomainFeeEntry) -> UtilizationFeeEntry {
        UtilizationFeeEntry {
            id: domain.id,
            common_area_id: domain.common_area_id,
            value: domain.value,
            valid_since: domain.valid_since.format("%Y-%m-%d").to_string(),
            created_by: domain.created_by,
        }
    }

    pub fn to_command(common_area_id: String, request: AddFeeEntryRequest) -> AddFeeEntryCommand {
        AddFeeEntryCommand {
            common_area_id,
            value: request.value,
            valid_since: request.valid_since,
            created_by: request.created_by,
        }
    }

    pub fn to_add_response(result: AddFeeEntryResult) -> AddFeeEntryResponse {
        AddFeeEntryResponse {
            entry: Self::to_dto(result.entry),
            success_message: result.success_message,
        }
    }

    pub fn to_history_response(result: FeeHistoryResult) -> FeeHistoryResponse {
        FeeHistoryResponse {
            entries: result.entries.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_effective_response(result: EffectiveFeeResult) -> EffectiveFeeResponse {
        EffectiveFeeResponse {
            as_of: result.as_of.format("%Y-%m-%d").to_string(),
            entry: result.entry.map(Self::to_dto),
        }
    }
}
