use super::shutdown::shutdown_signal;
use crate::errors::handlers::{handle_panic, route_not_found};
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::openapi::OpenApi;

/// Assemble the service router.
///
/// - Swagger UI at `/swagger-ui` serving `openapi` from `/api-docs/openapi.json`
/// - `apis` mounted under `base_path` (merged at the root when `base_path` is empty or `/`)
/// - unknown paths and unsupported methods answer the "Route not found" envelope
/// - handler panics answer the 500 envelope
/// - request tracing, security headers, `cors` and response compression
///
/// `apis` must already have its state applied.
pub fn create_router(base_path: &str, apis: Router, openapi: OpenApi, cors: CorsLayer) -> Router {
    use utoipa_swagger_ui::SwaggerUi;

    let apis = apis.method_not_allowed_fallback(route_not_found);

    let base_path = base_path.trim_end_matches('/');
    let mounted = if base_path.is_empty() {
        Router::new().merge(apis)
    } else {
        Router::new().nest(base_path, apis)
    };

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(mounted)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// In-flight requests are drained before `cleanup` starts; `cleanup` itself is
/// bounded by `server_config.shutdown_timeout`.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config.server, async move {
///     mongo_client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    let timeout = server_config.shutdown_timeout;
    info!("Starting cleanup tasks (timeout: {:?})", timeout);
    match tokio::time::timeout(timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!("Cleanup exceeded timeout of {:?}, forcing shutdown", timeout),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::messages;
    use crate::server::health_router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use utoipa::openapi::OpenApiBuilder;

    async fn panics() -> &'static str {
        panic!("handler exploded")
    }

    fn app(base_path: &str) -> Router {
        let apis = Router::new()
            .merge(health_router())
            .route("/things", get(|| async { "things" }))
            .route("/explode", get(panics));
        create_router(
            base_path,
            apis,
            OpenApiBuilder::new().build(),
            CorsLayer::permissive(),
        )
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_routes_are_mounted_under_base_path() {
        let (status, body) = send(app("/api/v3/app"), "GET", "/api/v3/app/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");

        let (status, _) = send(app("/api/v3/app"), "GET", "/health").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_base_path_merges() {
        let (status, _) = send(app("/"), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_envelope() {
        let (status, body) = send(app("/api"), "GET", "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], messages::ROUTE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_404_envelope() {
        let (status, body) = send(app("/api"), "PATCH", "/api/things").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], messages::ROUTE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_panic_is_500_envelope() {
        let (status, body) = send(app("/api"), "GET", "/api/explode").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], messages::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_security_headers_are_set() {
        let response = app("/api")
            .oneshot(
                Request::builder()
                    .uri("/api/things")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }
}
