pub mod handlers;
pub mod messages;
pub mod responses;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_config::Environment;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

static EXPOSE_ERROR_DETAILS: OnceCell<bool> = OnceCell::new();

/// Decide once, at startup, whether 500 responses carry the raw error text.
///
/// Later calls are ignored. When never called the decision is taken from
/// `APP_ENV` on the first internal error.
pub fn configure_error_details(environment: Environment) {
    let _ = EXPOSE_ERROR_DETAILS.set(environment.exposes_error_details());
}

fn error_details_exposed() -> bool {
    *EXPOSE_ERROR_DETAILS.get_or_init(|| Environment::from_env().exposes_error_details())
}

/// Failure envelope returned by every endpoint.
///
/// ```json
/// { "success": false, "message": "Event not found" }
/// ```
///
/// `error` carries internal detail and is only present outside production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Human-readable error message
    pub message: String,
    /// Raw error detail (development only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }

    /// Attach `detail` when `expose` is set, drop it otherwise
    pub fn with_detail(mut self, detail: impl Into<String>, expose: bool) -> Self {
        if expose {
            self.error = Some(detail.into());
        }
        self
    }
}

/// Application error type rendered as the failure envelope.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// The message is internal detail; clients see a generic message.
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the response body, exposing internal detail only if `expose_details`
    pub fn to_error_response(&self, expose_details: bool) -> ErrorResponse {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => ErrorResponse::new(msg.clone()),
            AppError::InternalServerError(detail) => {
                ErrorResponse::new(messages::INTERNAL_ERROR).with_detail(detail.clone(), expose_details)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::BadRequest(msg) => tracing::info!("Bad request: {}", msg),
            AppError::NotFound(msg) => tracing::info!("Not found: {}", msg),
            AppError::InternalServerError(detail) => {
                tracing::error!("Internal server error: {}", detail)
            }
        }

        let body = self.to_error_response(error_details_exposed());
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = AppError::BadRequest("Invalid Event ID format".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(err.to_error_response(true)).unwrap(),
            json!({"success": false, "message": "Invalid Event ID format"})
        );

        let err = AppError::NotFound("Event not found".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_error_response(true).message, "Event not found");
    }

    #[test]
    fn test_internal_error_detail_only_when_exposed() {
        let err = AppError::InternalServerError("connection reset".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let dev = err.to_error_response(true);
        assert_eq!(dev.message, messages::INTERNAL_ERROR);
        assert_eq!(dev.error.as_deref(), Some("connection reset"));

        let prod = serde_json::to_value(err.to_error_response(false)).unwrap();
        assert_eq!(
            prod,
            json!({"success": false, "message": messages::INTERNAL_ERROR})
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NotFound("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
