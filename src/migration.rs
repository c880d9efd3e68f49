//! Apply the entity registry to the database: one CREATE TABLE IF NOT EXISTS per entity.
//! Existing tables are left as they are; columns are never altered.

use crate::config::EntityRegistry;
use crate::error::AppError;
use crate::sql::create_table;
use sqlx::SqlitePool;

pub async fn apply_migrations(pool: &SqlitePool, registry: &EntityRegistry) -> Result<(), AppError> {
    for entity in registry.entities() {
        let sql = create_table(entity);
        tracing::debug!(sql = %sql, "ddl");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(tables = registry.len(), "database tables ensured");
    Ok(())
}
