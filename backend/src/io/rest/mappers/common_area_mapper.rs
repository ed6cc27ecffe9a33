use shared::{CommonArea, CommonAreaConfiguration, CommonAreaListResponse, CommonAreaResponse, CreateCommonAreaRequest};

use crate::domain::commands::common_areas::{CommonAreaResult, CreateCommonAreaCommand, UpdateConfigurationCommand};
use crate::domain::models::common_area::{CommonArea as DomainCommonArea, CommonAreaFlags};

pub struct CommonAreaMapper;

impl CommonAreaMapper {
    pub fn flags_to_dto(flags: CommonAreaFlags) -> CommonAreaConfiguration {
        CommonAreaConfiguration {
            does_it_require_reservation: flags.does_it_require_reservation,
            does_it_have_usage_fee: flags.does_it_have_usage_fee,
            does_it_allow_reservation_to_defaulters: flags.does_it_allow_reservation_to_defaulters,
            does_it_have_entry_checklist: flags.does_it_have_entry_checklist,
            does_it_have_exit_checklist: flags.does_it_have_exit_checklist,
        }
    }

    pub fn flags_to_domain(dto: CommonAreaConfiguration) -> CommonAreaFlags {
        CommonAreaFlags {
            does_it_require_reservation: dto.does_it_require_reservation,
            does_it_have_usage_fee: dto.does_it_have_usage_fee,
            does_it_allow_reservation_to_defaulters: dto.does_it_allow_reservation_to_defaulters,
            does_it_have_entry_checklist: dto.does_it_have_entry_checklist,
            does_it_have_exit_checklist: dto.does_it_have_exit_checklist,
        }
    }

    pub fn to_dto(domain: DomainCommonArea) -> CommonArea {
        CommonArea {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            capacity: domain.capacity,
            configuration: Self::flags_to_dto(domain.flags),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_create_command(request: CreateCommonAreaRequest) -> CreateCommonAreaCommand {
        CreateCommonAreaCommand {
            name: request.name,
            description: request.description,
            capacity: request.capacity,
            flags: Self::flags_to_domain(request.configuration),
        }
    }

    pub fn to_update_command(common_area_id: String, configuration: CommonAreaConfiguration) -> UpdateConfigurationCommand {
        UpdateConfigurationCommand {
            common_area_id,
            flags: Self::flags_to_domain(configuration),
        }
    }

    pub fn to_response(result: CommonAreaResult) -> CommonAreaResponse {
        CommonAreaResponse {
            common_area: Self::to_dto(result.common_area),
            success_message: Some(result.success_message),
        }
    }

    pub fn to_list_response(areas: Vec<DomainCommonArea>) -> CommonAreaListResponse {
        CommonAreaListResponse {
            common_areas: areas.into_iter().map(Self::to_dto).collect(),
        }
    }
}
