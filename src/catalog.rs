//! Live table catalog read from `sqlite_master`. Never cached: generated apps can
//! change their schema between calls.

use crate::error::AppError;
use sqlx::SqlitePool;

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name";

/// A table name confirmed present in the live catalog. The only way to name a
/// table in preview and export queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedTable(String);

impl ValidatedTable {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ValidatedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct CatalogReader;

impl CatalogReader {
    /// All tables in storage, lexicographically ordered.
    pub async fn list_tables(pool: &SqlitePool) -> Result<Vec<String>, AppError> {
        tracing::debug!(sql = %LIST_TABLES_SQL, "query");
        let names = sqlx::query_scalar::<_, String>(LIST_TABLES_SQL)
            .fetch_all(pool)
            .await?;
        Ok(names)
    }

    pub async fn table_exists(pool: &SqlitePool, name: &str) -> Result<bool, AppError> {
        let tables = Self::list_tables(pool).await?;
        Ok(tables.iter().any(|t| t == name))
    }

    /// Check `name` against the live catalog before any query mentions it.
    pub async fn require_table(pool: &SqlitePool, name: &str) -> Result<ValidatedTable, AppError> {
        if Self::table_exists(pool, name).await? {
            Ok(ValidatedTable(name.to_string()))
        } else {
            tracing::debug!(table = %name, "rejected table name not in catalog");
            Err(AppError::InvalidTable(name.to_string()))
        }
    }
}
