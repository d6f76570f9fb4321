//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use smarthome_domain::error::{SmartHomeError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Render `message` as a JSON error body with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Maps [`SmartHomeError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(SmartHomeError);

impl From<SmartHomeError> for ApiError {
    fn from(err: SmartHomeError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SmartHomeError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            SmartHomeError::Constraint(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SmartHomeError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            SmartHomeError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (StatusCode::BAD_REQUEST, "storage error".to_string())
            }
        };

        error_response(status, message)
    }
}
