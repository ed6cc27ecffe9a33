//! # REST API for Utilization Fees
//!
//! The fee history is append-only: entries are listed newest first and the
//! fee in force on a date is resolved from the history.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{AddFeeEntryRequest, EffectiveFeeQuery};
use tracing::{error, info, warn};

use crate::domain::commands::{CommandOutcome, ReservationCommand};
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::fee_mapper::FeeMapper;
use crate::io::rest::reservation_period_apis::unexpected_outcome;
use crate::AppState;

/// Create a router for utilization fee related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:id/fees", get(get_fee_history).post(add_fee_entry))
        .route("/:id/fees/effective", get(get_effective_fee))
}

pub async fn get_fee_history(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/common-areas/{}/fees", id);

    match state.fee_service.get_history(&id).await {
        Ok(result) => (StatusCode::OK, Json(FeeMapper::to_history_response(result))).into_response(),
        Err(e) => {
            error!("Failed to load fee history for {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn add_fee_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddFeeEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/common-areas/{}/fees - request: {:?}", id, request);

    let command = ReservationCommand::AddFeeEntry(FeeMapper::to_command(id, request));
    match state.dispatcher.execute(command).await {
        Ok(CommandOutcome::FeeEntryAdded(result)) => {
            (StatusCode::CREATED, Json(FeeMapper::to_add_response(result))).into_response()
        }
        Ok(other) => unexpected_outcome(other),
        Err(e) => {
            warn!("Fee entry rejected: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Fee in force on `as_of` (defaults to today)
pub async fn get_effective_fee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EffectiveFeeQuery>,
) -> impl IntoResponse {
    info!("GET /api/common-areas/{}/fees/effective - {:?}", id, query);

    match state.fee_service.get_effective_fee(&id, query.as_of.as_deref()).await {
        Ok(result) => (StatusCode::OK, Json(FeeMapper::to_effective_response(result))).into_response(),
        Err(e) => {
            error!("Failed to resolve effective fee for {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}
