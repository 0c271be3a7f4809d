//! Server infrastructure: router assembly, health endpoint and graceful shutdown.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let api_routes = Router::new().merge(health_router()).merge(domain_routes);
//! let router = create_router("/api/v3/app", api_routes, ApiDoc::openapi(), cors);
//! create_production_app(router, &config.server, async move { drop(client) }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
