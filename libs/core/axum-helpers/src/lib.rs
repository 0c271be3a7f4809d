//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the `{ success, data, message, pagination }` success body
//! - **[`errors`]**: [`AppError`] and the `{ success: false, message, error? }` failure body
//! - **[`extractors`]**: request extractors ([`JsonObject`])
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use axum_helpers::http::create_permissive_cors_layer;
//! use core_config::server::ServerConfig;
//!
//! let api_routes = Router::new(); // Add your routes
//! let router = create_router("/api", api_routes, ApiDoc::openapi(), create_permissive_cors_layer());
//! create_production_app(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use envelope::ApiResponse;
pub use errors::{AppError, ErrorResponse, configure_error_details};
pub use extractors::JsonObject;
pub use server::{
    HealthResponse, create_production_app, create_router, health_router, shutdown_signal,
};
