//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::error;

use crate::domain::{RuleViolation, ServiceError};

/// Wraps a `ServiceError` so handlers can turn it into a response
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        ApiError(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Rule(violation) => match violation {
                RuleViolation::ShapeMismatch(_) | RuleViolation::NonPositiveValue | RuleViolation::InvalidDate(_) => {
                    StatusCode::BAD_REQUEST
                }
                RuleViolation::FullDayConflictsWithTimedPeriods
                | RuleViolation::TimedConflictsWithFullDayPeriod
                | RuleViolation::FullDayPeriodAlreadyExists
                | RuleViolation::HasFutureReservations => StatusCode::CONFLICT,
            },
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::NotApplicable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match &self.0 {
            ServiceError::Rule(violation) => violation.code(),
            ServiceError::NotFound { .. } => "not_found",
            ServiceError::NotApplicable(_) => "not_applicable",
            ServiceError::PermissionDenied(_) => "permission_denied",
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::Storage(_) => "storage_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            // Storage details stay in the log
            ServiceError::Storage(e) => {
                error!("Storage failure: {:#}", e);
                "Internal storage error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: self.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
