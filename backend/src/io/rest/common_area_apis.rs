//! # REST API for Common Areas
//!
//! Registration and configuration of the areas that periods and fees hang off.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{CommonAreaConfiguration, CommonAreaResponse, CreateCommonAreaRequest};
use tracing::{error, info};

use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::common_area_mapper::CommonAreaMapper;
use crate::AppState;

/// Create a router for common area related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_common_areas).post(create_common_area))
        .route("/:id", get(get_common_area))
        .route("/:id/configuration", put(update_configuration))
}

pub async fn list_common_areas(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/common-areas");

    match state.common_area_service.list_common_areas().await {
        Ok(areas) => (StatusCode::OK, Json(CommonAreaMapper::to_list_response(areas))).into_response(),
        Err(e) => {
            error!("Failed to list common areas: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn create_common_area(
    State(state): State<AppState>,
    Json(request): Json<CreateCommonAreaRequest>,
) -> impl IntoResponse {
    info!("POST /api/common-areas - request: {:?}", request);

    let command = CommonAreaMapper::to_create_command(request);
    match state.common_area_service.create_common_area(command).await {
        Ok(result) => (StatusCode::CREATED, Json(CommonAreaMapper::to_response(result))).into_response(),
        Err(e) => {
            error!("Failed to create common area: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn get_common_area(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/common-areas/{}", id);

    match state.common_area_service.get_common_area(&id).await {
        Ok(area) => {
            let response = CommonAreaResponse {
                common_area: CommonAreaMapper::to_dto(area),
                success_message: None,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to get common area {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Replace the configuration flags of a common area
pub async fn update_configuration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(configuration): Json<CommonAreaConfiguration>,
) -> impl IntoResponse {
    info!("PUT /api/common-areas/{}/configuration - {:?}", id, configuration);

    let command = CommonAreaMapper::to_update_command(id, configuration);
    match state.common_area_service.update_configuration(command).await {
        Ok(result) => (StatusCode::OK, Json(CommonAreaMapper::to_response(result))).into_response(),
        Err(e) => {
            error!("Failed to update configuration: {}", e);
            ApiError::from(e).into_response()
        }
    }
}
