//! Shared application state for all routes.

use crate::config::EntityRegistry;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Fixed at startup; entity definitions do not change while serving.
    pub entities: Arc<EntityRegistry>,
}

impl AppState {
    pub fn new(pool: SqlitePool, entities: EntityRegistry) -> Self {
        AppState {
            pool,
            entities: Arc::new(entities),
        }
    }
}
