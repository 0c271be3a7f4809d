//! Shared application state passed to the request handlers

use mongodb::{Client, Database};

/// Cloned per handler; the MongoDB handles share one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
