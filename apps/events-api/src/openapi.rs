//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::health::HealthApi;

/// Combined OpenAPI documentation for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = "0.1.0",
        description = "CRUD and latest-first listing of event documents stored in MongoDB"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "events", description = "Event documents stored in MongoDB"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// The full document with the events and health paths under `base_path`
    pub fn for_base_path(base_path: &str) -> utoipa::openapi::OpenApi {
        let base_path = base_path.trim_end_matches('/');
        Self::openapi()
            .nest(base_path, domain_events::ApiDoc::openapi())
            .nest(base_path, HealthApi::openapi())
    }
}
