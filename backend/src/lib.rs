//! # Condominium reservation backend
//!
//! Rules engine and HTTP service for the reservation periods and utilization
//! fee history of condominium common areas.
//!
//! ## Layers
//!
//! - **storage**: CSV/YAML files under the configured data directory
//! - **domain**: pure rules (`ReservationPeriodRules`, `UtilizationFeeRules`)
//!   and the services that load snapshots, apply the rules and persist
//! - **io**: axum handlers and DTO mappers
//!
//! `initialize_backend` wires the layers together and `create_router` exposes
//! them under `/api`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    CommandDispatcher, CommonAreaService, PermissionChecker, ReservationPeriodService, StaticPermissions,
    UtilizationFeeService,
};
use crate::storage::{
    CommonAreaRepository, CsvConnection, ReservationPeriodRepository, ReservationRepository,
    UtilizationFeeRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub common_area_service: CommonAreaService,
    pub period_service: ReservationPeriodService,
    pub fee_service: UtilizationFeeService,
    pub dispatcher: CommandDispatcher,
}

pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage in {}", config.data_directory.display());
    let connection = CsvConnection::new(&config.data_directory)?;

    info!("Setting up domain services (read_only: {})", config.read_only);
    let permissions: Arc<dyn PermissionChecker> = Arc::new(StaticPermissions {
        read_only: config.read_only,
    });

    let common_area_service = CommonAreaService::new(
        Arc::new(CommonAreaRepository::new(connection.clone())),
        permissions.clone(),
    );
    let period_service = ReservationPeriodService::new(
        common_area_service.clone(),
        Arc::new(ReservationPeriodRepository::new(connection.clone())),
        Arc::new(ReservationRepository::new(connection.clone())),
        permissions.clone(),
    );
    let fee_service = UtilizationFeeService::new(
        common_area_service.clone(),
        Arc::new(UtilizationFeeRepository::new(connection)),
        permissions,
    );
    let dispatcher = CommandDispatcher::new(period_service.clone(), fee_service.clone());

    Ok(AppState {
        common_area_service,
        period_service,
        fee_service,
        dispatcher,
    })
}

pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin '{}'", config.allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", io::rest::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestApp {
        _temp_dir: TempDir,
        router: Router,
    }

    impl TestApp {
        async fn new(read_only: bool) -> Self {
            let temp_dir = TempDir::new().unwrap();
            let config = AppConfig {
                data_directory: temp_dir.path().to_path_buf(),
                read_only,
                ..AppConfig::default()
            };
            let state = initialize_backend(&config).await.unwrap();
            let router = create_router(state, &config).unwrap();
            Self {
                _temp_dir: temp_dir,
                router,
            }
        }

        async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(match body {
                    Some(value) => Body::from(value.to_string()),
                    None => Body::empty(),
                })
                .unwrap();

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json)
        }

        async fn create_area(&self, reservations: bool, fees: bool) -> String {
            let (status, body) = self
                .send(
                    "POST",
                    "/api/common-areas",
                    Some(json!({
                        "name": "Party room",
                        "doesItRequireReservation": reservations,
                        "doesItHaveUsageFee": fees,
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            body["commonArea"]["id"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new(false).await;
        let (status, body) = app.send("GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_common_area_lifecycle() {
        let app = TestApp::new(false).await;
        let id = app.create_area(false, false).await;

        let (status, body) = app.send("GET", &format!("/api/common-areas/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["commonArea"]["name"], "Party room");
        assert_eq!(body["commonArea"]["doesItRequireReservation"], false);

        let (status, body) = app
            .send(
                "PUT",
                &format!("/api/common-areas/{}/configuration", id),
                Some(json!({ "doesItRequireReservation": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["commonArea"]["doesItRequireReservation"], true);

        let (status, body) = app.send("GET", "/api/common-areas", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["commonAreas"].as_array().unwrap().len(), 1);

        let (status, body) = app.send("GET", "/api/common-areas/common_area::missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_period_endpoints() {
        let app = TestApp::new(false).await;
        let id = app.create_area(true, false).await;
        let periods_uri = format!("/api/common-areas/{}/periods", id);

        let (status, body) = app
            .send(
                "POST",
                &periods_uri,
                Some(json!({ "isFullDay": false, "startTime": "22:00", "endTime": "02:00" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["advisories"][0]["code"], "suspicious_time_order");
        let period_id = body["period"]["id"].as_str().unwrap().to_string();

        let (status, body) = app
            .send("POST", &format!("{}/validate", periods_uri), Some(json!({ "isFullDay": true })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isValid"], false);
        assert_eq!(body["violation"]["code"], "full_day_conflicts_with_timed_periods");

        let (status, body) = app.send("POST", &periods_uri, Some(json!({ "isFullDay": true }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "full_day_conflicts_with_timed_periods");

        let (status, body) = app
            .send("POST", &periods_uri, Some(json!({ "isFullDay": false, "startTime": "09:00" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "shape_mismatch");

        let (status, body) = app.send("GET", &periods_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["periods"].as_array().unwrap().len(), 1);
        assert_eq!(body["periods"][0]["startTime"], "22:00");

        let (status, body) = app
            .send("POST", &format!("{}/{}/deactivate", periods_uri, period_id), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"]["isActive"], false);
        assert_eq!(body["advisories"][0]["code"], "last_period_warning");
    }

    #[tokio::test]
    async fn test_future_reservation_blocks_deactivation() {
        let app = TestApp::new(false).await;
        let id = app.create_area(true, false).await;
        let periods_uri = format!("/api/common-areas/{}/periods", id);

        let (_, body) = app.send("POST", &periods_uri, Some(json!({ "isFullDay": true }))).await;
        let period_id = body["period"]["id"].as_str().unwrap().to_string();

        let (status, _) = app
            .send(
                "POST",
                &format!("{}/{}/reservations", periods_uri, period_id),
                Some(json!({ "date": "2999-01-01", "reservedBy": "unit-101" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = app.send("GET", &periods_uri, None).await;
        assert_eq!(body["periods"][0]["hasFutureReservation"], true);

        let (status, body) = app
            .send("POST", &format!("{}/{}/deactivate", periods_uri, period_id), None)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "has_future_reservations");
    }

    #[tokio::test]
    async fn test_fee_endpoints() {
        let app = TestApp::new(false).await;
        let id = app.create_area(false, true).await;
        let fees_uri = format!("/api/common-areas/{}/fees", id);

        for (value, since) in [(50.0, "2024-01-01"), (75.0, "2024-06-01")] {
            let (status, body) = app
                .send(
                    "POST",
                    &fees_uri,
                    Some(json!({ "value": value, "validSince": since, "createdBy": "admin" })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["entry"]["fk_common_area"], id.as_str());
        }

        let (status, body) = app
            .send(
                "POST",
                &fees_uri,
                Some(json!({ "value": 0.0, "validSince": "2024-07-01", "createdBy": "admin" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "non_positive_value");

        let (status, body) = app.send("GET", &fees_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entries"][0]["validSince"], "2024-06-01");
        assert_eq!(body["entries"].as_array().unwrap().len(), 2);

        let (status, body) = app
            .send("GET", &format!("{}/effective?as_of=2024-03-15", fees_uri), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["asOf"], "2024-03-15");
        assert_eq!(body["entry"]["value"], 50.0);

        let (_, body) = app
            .send("GET", &format!("{}/effective?as_of=2023-12-31", fees_uri), None)
            .await;
        assert!(body["entry"].is_null());
    }

    #[tokio::test]
    async fn test_unconfigured_area_rejects_periods_and_fees() {
        let app = TestApp::new(false).await;
        let id = app.create_area(false, false).await;

        let (status, body) = app
            .send(
                "POST",
                &format!("/api/common-areas/{}/periods", id),
                Some(json!({ "isFullDay": true })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "not_applicable");

        let (status, _) = app
            .send(
                "POST",
                &format!("/api/common-areas/{}/fees", id),
                Some(json!({ "value": 10.0, "validSince": "2024-01-01", "createdBy": "admin" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_read_only_mode_is_forbidden() {
        let app = TestApp::new(true).await;
        let (status, body) = app
            .send("POST", "/api/common-areas", Some(json!({ "name": "Gym" })))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "permission_denied");
    }

    #[tokio::test]
    async fn test_invalid_origin_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig {
            data_directory: temp_dir.path().to_path_buf(),
            allowed_origin: "bad\norigin".to_string(),
            ..AppConfig::default()
        };
        let state = initialize_backend(&config).await.unwrap();
        assert!(create_router(state, &config).is_err());
    }
}
