use shared::{
    AddPeriodRequest, AddPeriodResponse, AdvisoryDto, DeactivatePeriodResponse, DescribedPeriod, ListPeriodsResponse,
    RecordReservationRequest, RecordReservationResponse, Reservation, ReservationPeriod, ValidatePeriodResponse,
    ViolationDto,
};

use crate::domain::commands::periods::{
    AddPeriodCommand, AddPeriodResult, DeactivatePeriodResult, DescribedPeriod as DomainDescribedPeriod,
    ListPeriodsResult, RecordReservationCommand, RecordReservationResult, ValidatePeriodResult,
};
use crate::domain::models::reservation::Reservation as DomainReservation;
use crate::domain::models::reservation_period::ReservationPeriod as DomainPeriod;
use crate::domain::violations::{Advisory, RuleViolation};

pub struct PeriodMapper;

impl PeriodMapper {
    pub fn to_dto(domain: DomainPeriod) -> ReservationPeriod {
        ReservationPeriod {
            id: domain.id,
            common_area_id: domain.common_area_id,
            is_full_day: domain.is_full_day,
            start_time: domain.start_time,
            end_time: domain.end_time,
            is_active: domain.is_active,
            has_future_reservation: domain.has_future_reservation,
        }
    }

    pub fn described_to_dto(domain: DomainDescribedPeriod) -> DescribedPeriod {
        DescribedPeriod {
            period: Self::to_dto(domain.period),
            label: domain.label,
        }
    }

    pub fn advisory_to_dto(advisory: &Advisory) -> AdvisoryDto {
        AdvisoryDto {
            code: advisory.code().to_string(),
            message: advisory.message(),
        }
    }

    pub fn violation_to_dto(violation: &RuleViolation) -> ViolationDto {
        ViolationDto {
            code: violation.code().to_string(),
            message: violation.to_string(),
        }
    }

    pub fn to_add_command(common_area_id: String, request: AddPeriodRequest) -> AddPeriodCommand {
        AddPeriodCommand {
            common_area_id,
            is_full_day: request.is_full_day,
            start_time: request.start_time,
            end_time: request.end_time,
        }
    }

    pub fn to_reservation_command(
        common_area_id: String,
        period_id: String,
        request: RecordReservationRequest,
    ) -> RecordReservationCommand {
        RecordReservationCommand {
            common_area_id,
            period_id,
            date: request.date,
            reserved_by: request.reserved_by,
        }
    }

    pub fn to_list_response(result: ListPeriodsResult) -> ListPeriodsResponse {
        ListPeriodsResponse {
            periods: result.periods.into_iter().map(Self::described_to_dto).collect(),
        }
    }

    pub fn to_add_response(result: AddPeriodResult) -> AddPeriodResponse {
        AddPeriodResponse {
            advisories: result.advisories.iter().map(Self::advisory_to_dto).collect(),
            period: Self::described_to_dto(result.period),
            success_message: result.success_message,
        }
    }

    pub fn to_validate_response(result: ValidatePeriodResult) -> ValidatePeriodResponse {
        ValidatePeriodResponse {
            is_valid: result.violation.is_none(),
            violation: result.violation.as_ref().map(Self::violation_to_dto),
            advisories: result.advisories.iter().map(Self::advisory_to_dto).collect(),
        }
    }

    pub fn to_deactivate_response(result: DeactivatePeriodResult) -> DeactivatePeriodResponse {
        DeactivatePeriodResponse {
            advisories: result.advisories.iter().map(Self::advisory_to_dto).collect(),
            period: Self::described_to_dto(result.period),
            success_message: result.success_message,
        }
    }

    pub fn reservation_to_dto(domain: DomainReservation) -> Reservation {
        Reservation {
            id: domain.id,
            period_id: domain.period_id,
            common_area_id: domain.common_area_id,
            date: domain.date.format("%Y-%m-%d").to_string(),
            reserved_by: domain.reserved_by,
            created_at: domain.created_at,
        }
    }

    pub fn to_reservation_response(result: RecordReservationResult) -> RecordReservationResponse {
        RecordReservationResponse {
            reservation: Self::reservation_to_dto(result.reservation),
            success_message: result.success_message,
        }
    }
}
