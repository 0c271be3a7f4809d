//! Lenient JSON object body extractor.

use crate::errors::{AppError, ErrorResponse, messages};
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

/// Request body parsed as a JSON object.
///
/// Unlike `axum::Json` it does not require a `Content-Type` header, and an empty
/// body yields an empty map so handlers can report a field-level error instead
/// of a transport-level one. Anything that is not a JSON object is rejected with
/// a 400 failure envelope. A body that cannot be read keeps the status of the
/// underlying rejection (413 when it exceeds the body limit).
///
/// # Example
/// ```ignore
/// use axum_helpers::JsonObject;
///
/// async fn create(JsonObject(body): JsonObject) -> String {
///     format!("{} fields", body.len())
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    /// Parse raw body bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) | Err(_) => Err(AppError::BadRequest(messages::BODY_NOT_OBJECT.to_string())),
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| (e.status(), Json(ErrorResponse::new(e.body_text()))).into_response())?;

        Self::from_bytes(&bytes).map_err(IntoResponse::into_response)
    }
}
