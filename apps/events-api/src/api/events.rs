//! Events API routes backed by MongoDB

use crate::state::AppState;
use axum::Router;
use domain_events::{EventService, MongoEventRepository};
use eyre::WrapErr;
use tracing::info;

/// Create the events router over the `events` collection
pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(&state.db);
    domain_events::handlers::router(EventService::new(repository))
}

/// Initialize event indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoEventRepository::new(db)
        .create_indexes()
        .await
        .wrap_err("Failed to create event indexes")?;
    info!("Event collection indexes created");
    Ok(())
}
