use axum::{Json, Router, routing::get};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness body: `{ "status": "OK", "message": "...", "timestamp": "<RFC 3339>" }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Server is running".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Liveness endpoint. Always 200 while the process is serving.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is alive", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Router exposing `GET /health`
pub fn health_router() -> Router {
    Router::new().route("/health", get(health_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn test_health_handler_body() {
        let Json(body) = health_handler().await;
        assert_eq!(body.status, "OK");
        assert_eq!(body.message, "Server is running");
        assert!(DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
        assert!(body.timestamp.ends_with('Z'));
    }
}
