//! API routes module
//!
//! Everything here is mounted under the configured base path by
//! `axum_helpers::create_router`.

pub mod events;
pub mod health;

use axum::Router;
use axum_helpers::http::cors_layer_from_env;
use axum_helpers::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(events::router(state))
        .merge(health_router())
        .merge(health::router(state.clone()))
}

/// The complete service: API routes, docs, fallbacks and middleware
pub fn app(state: &AppState) -> std::io::Result<Router> {
    Ok(create_router(
        &state.config.base_path,
        routes(state),
        ApiDoc::for_base_path(&state.config.base_path),
        cors_layer_from_env()?,
    ))
}
