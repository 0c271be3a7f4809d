//! Event domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

pub const ID_REQUIRED: &str = "Event ID is required";
pub const INVALID_ID: &str = "Invalid Event ID format";
pub const NOT_FOUND: &str = "Event not found";
pub const NAME_REQUIRED: &str = "Event name is required";
pub const NO_UPDATE_FIELDS: &str = "No update fields provided";
pub const INVALID_SCHEDULE: &str = "Invalid schedule date";
pub const INVALID_LIMIT: &str = "Limit must be a positive integer";
pub const INVALID_PAGE: &str = "Page must be a positive integer";

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

#[derive(Debug, Error)]
pub enum EventError {
    /// Missing or malformed client input; the message is sent to the client as-is
    #[error("{0}")]
    Validation(String),

    /// The identifier is not a well-formed store key
    #[error("Invalid Event ID format: {0}")]
    InvalidId(String),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl EventError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Body fields of the wrong JSON type
impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(format!("Invalid request body: {}", err))
    }
}

/// Reports the first failing field's message
impl From<validator::ValidationErrors> for EventError {
    fn from(err: validator::ValidationErrors) -> Self {
        let message = err
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| err.to_string());
        Self::Validation(message)
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation(message) => AppError::BadRequest(message),
            EventError::InvalidId(_) => AppError::BadRequest(INVALID_ID.to_string()),
            EventError::NotFound(_) => AppError::NotFound(NOT_FOUND.to_string()),
            EventError::Database(message) => AppError::InternalServerError(message),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EventError::validation(NAME_REQUIRED), StatusCode::BAD_REQUEST),
            (EventError::InvalidId("xyz".into()), StatusCode::BAD_REQUEST),
            (EventError::NotFound("abc".into()), StatusCode::NOT_FOUND),
            (EventError::Database("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_client_messages_hide_raw_input() {
        let app: AppError = EventError::InvalidId("not-an-id".into()).into();
        assert!(matches!(app, AppError::BadRequest(ref m) if m == INVALID_ID));

        let app: AppError = EventError::NotFound("65a0c0ffee".into()).into();
        assert!(matches!(app, AppError::NotFound(ref m) if m == NOT_FOUND));
    }
}
