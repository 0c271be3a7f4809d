use axum_helpers::{configure_error_details, create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::connect_from_config;
use eyre::WrapErr;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);
    configure_error_details(config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        "Connecting to MongoDB at {}",
        config.mongodb.redacted_url()
    );

    // A store that is unreachable at startup is fatal: no retry
    let mongo_client = connect_from_config(&config.mongodb)
        .await
        .wrap_err("MongoDB startup health check failed")?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    api::events::init_indexes(&db).await?;

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let app = api::app(&state).wrap_err("Invalid CORS configuration")?;

    info!(
        base_path = %state.config.base_path,
        timeout = ?state.config.server.shutdown_timeout,
        "Starting Events API with graceful shutdown"
    );

    create_production_app(app, &state.config.server, async move {
        info!("Shutting down: closing MongoDB connections");
        state.mongo_client.shutdown().await;
        info!("MongoDB connection closed successfully");
    })
    .await
    .wrap_err("Server error")?;

    info!("Events API shutdown complete");
    Ok(())
}
