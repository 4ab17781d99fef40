use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Field name -> human-readable message, as returned to the client.
pub type FieldErrors = BTreeMap<&'static str, String>;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error type returned by every operation and translated to an HTTP
/// response at the handler boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    /// Empty result set reported as a condition, not an empty list.
    #[error("{0}")]
    NoData(String),
    #[error(transparent)]
    Server(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Server(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "message": "Validation failed", "errors": errors }),
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "message": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::NoData(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            ApiError::Server(err) => {
                error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_field_messages() {
        let mut errors = FieldErrors::new();
        errors.insert("status", "status must be one of: pending, on_the_road, completed".into());
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::not_found("Reservation not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn no_data_reports_404_with_a_message() {
        let response = ApiError::NoData("No reservation data found.".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn server_error_hides_the_cause() {
        let response = ApiError::Server(anyhow::anyhow!("connection reset")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
