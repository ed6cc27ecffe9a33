//! # REST API for Reservation Periods
//!
//! Listing, dry-run validation, adding and deactivating the time windows of a
//! common area, plus recording reservations against a period. Mutations go
//! through the command dispatcher.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{AddPeriodRequest, RecordReservationRequest};
use tracing::{error, info, warn};

use crate::domain::commands::periods::DeactivatePeriodCommand;
use crate::domain::commands::{CommandOutcome, ReservationCommand};
use crate::domain::ServiceError;
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::period_mapper::PeriodMapper;
use crate::AppState;

/// Create a router for reservation period related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:id/periods", get(list_periods).post(add_period))
        .route("/:id/periods/validate", post(validate_period))
        .route("/:id/periods/:period_id/deactivate", post(deactivate_period))
        .route("/:id/periods/:period_id/reservations", post(record_reservation))
}

/// Every period of the area, active and inactive, in display order with labels
pub async fn list_periods(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/common-areas/{}/periods", id);

    match state.period_service.list_periods(&id).await {
        Ok(result) => (StatusCode::OK, Json(PeriodMapper::to_list_response(result))).into_response(),
        Err(e) => {
            error!("Failed to list periods for {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Check a candidate period without storing it
pub async fn validate_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddPeriodRequest>,
) -> impl IntoResponse {
    info!("POST /api/common-areas/{}/periods/validate - request: {:?}", id, request);

    let command = PeriodMapper::to_add_command(id, request);
    match state.period_service.validate_period(command).await {
        Ok(result) => (StatusCode::OK, Json(PeriodMapper::to_validate_response(result))).into_response(),
        Err(e) => {
            error!("Failed to validate period: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn add_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddPeriodRequest>,
) -> impl IntoResponse {
    info!("POST /api/common-areas/{}/periods - request: {:?}", id, request);

    let command = ReservationCommand::AddPeriod(PeriodMapper::to_add_command(id, request));
    match state.dispatcher.execute(command).await {
        Ok(CommandOutcome::PeriodAdded(result)) => {
            (StatusCode::CREATED, Json(PeriodMapper::to_add_response(result))).into_response()
        }
        Ok(other) => unexpected_outcome(other),
        Err(e) => {
            warn!("Period rejected: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn deactivate_period(
    State(state): State<AppState>,
    Path((id, period_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("POST /api/common-areas/{}/periods/{}/deactivate", id, period_id);

    let command = ReservationCommand::DeactivatePeriod(DeactivatePeriodCommand {
        common_area_id: id,
        period_id,
    });
    match state.dispatcher.execute(command).await {
        Ok(CommandOutcome::PeriodDeactivated(result)) => {
            (StatusCode::OK, Json(PeriodMapper::to_deactivate_response(result))).into_response()
        }
        Ok(other) => unexpected_outcome(other),
        Err(e) => {
            warn!("Deactivation rejected: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn record_reservation(
    State(state): State<AppState>,
    Path((id, period_id)): Path<(String, String)>,
    Json(request): Json<RecordReservationRequest>,
) -> impl IntoResponse {
    info!("POST /api/common-areas/{}/periods/{}/reservations - request: {:?}", id, period_id, request);

    let command = PeriodMapper::to_reservation_command(id, period_id, request);
    match state.period_service.record_reservation(command).await {
        Ok(result) => (StatusCode::CREATED, Json(PeriodMapper::to_reservation_response(result))).into_response(),
        Err(e) => {
            error!("Failed to record reservation: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub(crate) fn unexpected_outcome(outcome: CommandOutcome) -> axum::response::Response {
    error!("Dispatcher returned an unexpected outcome: {:?}", outcome);
    ApiError::from(ServiceError::Storage(anyhow::anyhow!("unexpected command outcome"))).into_response()
}
