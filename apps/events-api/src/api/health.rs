//! Readiness probe

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::HealthResponse;
use database::mongodb::{HealthStatus, check_health_detailed};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::state::AppState;

/// Body of `GET /ready`
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub mongodb: bool,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadinessResponse {
    /// 200 when MongoDB answers a ping, 503 otherwise
    fn from_health(health: HealthStatus) -> (StatusCode, Self) {
        let status = if health.healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        let body = Self {
            status: if health.healthy { "ready" } else { "unhealthy" }.to_string(),
            mongodb: health.healthy,
            response_time_ms: health.response_time_ms,
            error: health.message,
        };
        (status, body)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(axum_helpers::server::health::health_handler, readiness_check),
    components(schemas(HealthResponse, ReadinessResponse))
)]
pub struct HealthApi;

/// Create a readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check, verifies the MongoDB connection
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "MongoDB is reachable", body = ReadinessResponse),
        (status = 503, description = "MongoDB is unreachable", body = ReadinessResponse)
    ),
    tag = "health"
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let health = check_health_detailed(&state.mongo_client).await;
    let (status, body) = ReadinessResponse::from_health(health);
    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_healthy() {
        let (status, body) = ReadinessResponse::from_health(HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: 3,
        });
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ready");
        assert!(body.mongodb);
        assert!(body.error.is_none());
    }

    #[test]
    fn test_readiness_unhealthy() {
        let (status, body) = ReadinessResponse::from_health(HealthStatus {
            healthy: false,
            message: Some("Server selection timeout".into()),
            response_time_ms: 100,
        });
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "unhealthy");
        assert_eq!(body.error.as_deref(), Some("Server selection timeout"));
    }
}
