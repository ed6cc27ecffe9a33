//! # REST API Interface Layer
//!
//! HTTP endpoints for common areas, their reservation periods and their
//! utilization fee history. Handlers parse requests into domain commands,
//! call the services and map results (or errors) back to `shared` DTOs.

pub mod common_area_apis;
pub mod error;
pub mod mappers;
pub mod reservation_period_apis;
pub mod utilization_fee_apis;

use axum::{response::Json, routing::get, Router};
use shared::HealthResponse;

use crate::AppState;

/// Every API route, to be nested under `/api`
pub fn router() -> Router<AppState> {
    let common_areas = common_area_apis::router()
        .merge(reservation_period_apis::router())
        .merge(utilization_fee_apis::router());

    Router::new()
        .route("/health", get(health))
        .nest("/common-areas", common_areas)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
