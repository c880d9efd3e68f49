//! One-shot seeding: every empty entity table gets a single placeholder row.

use crate::config::EntitySchema;
use crate::error::{is_connectivity_error, AppError};
use crate::service::DefaultResolver;
use crate::sql::{count_rows, insert_row, SqliteBindValue};
use serde_json::Value;
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Clone, Debug, PartialEq)]
pub enum SeedStatus {
    Seeded,
    AlreadyPopulated,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeedResult {
    pub entity: String,
    pub status: SeedStatus,
}

pub struct Seeder;

impl Seeder {
    /// Seed every entity in order, each in its own transaction. A failing entity is
    /// rolled back and reported; only loss of the database aborts the run.
    pub async fn seed_all(pool: &SqlitePool, entities: &[EntitySchema]) -> Result<Vec<SeedResult>, AppError> {
        let mut results = Vec::with_capacity(entities.len());
        for entity in entities {
            let status = Self::seed_one(pool, entity).await?;
            match &status {
                SeedStatus::Seeded => tracing::info!(entity = %entity.label, table = %entity.table, "seeded"),
                SeedStatus::AlreadyPopulated => {
                    tracing::debug!(entity = %entity.label, table = %entity.table, "already populated")
                }
                SeedStatus::Failed(reason) => {
                    tracing::warn!(entity = %entity.label, table = %entity.table, reason = %reason, "could not seed")
                }
            }
            results.push(SeedResult {
                entity: entity.label.clone(),
                status,
            });
        }
        Ok(results)
    }

    /// Row candidate for an empty table: every column the resolver has a value for.
    pub fn sample_row(entity: &EntitySchema) -> Vec<(String, Value)> {
        entity
            .columns
            .iter()
            .filter_map(|c| DefaultResolver::default_for(c, &entity.label).map(|v| (c.name.clone(), v)))
            .collect()
    }

    async fn seed_one(pool: &SqlitePool, entity: &EntitySchema) -> Result<SeedStatus, AppError> {
        let mut tx = pool.begin().await?;
        match Self::seed_in_tx(&mut *tx, entity).await {
            Ok(status) => {
                if status == SeedStatus::Seeded {
                    if let Err(e) = tx.commit().await {
                        return Self::failed(e);
                    }
                }
                Ok(status)
            }
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    tracing::warn!(table = %entity.table, error = %rb, "rollback failed");
                }
                Self::failed(e)
            }
        }
    }

    async fn seed_in_tx(conn: &mut SqliteConnection, entity: &EntitySchema) -> Result<SeedStatus, sqlx::Error> {
        let sql = count_rows(entity);
        tracing::debug!(sql = %sql, "query (tx)");
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&mut *conn).await?;
        if count > 0 {
            return Ok(SeedStatus::AlreadyPopulated);
        }

        let q = insert_row(entity, &Self::sample_row(entity));
        tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(SqliteBindValue::from_json(p));
        }
        query.execute(&mut *conn).await?;
        Ok(SeedStatus::Seeded)
    }

    fn failed(e: sqlx::Error) -> Result<SeedStatus, AppError> {
        if is_connectivity_error(&e) {
            return Err(AppError::Db(e));
        }
        Ok(SeedStatus::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnDescriptor;
    use crate::db::connect_in_memory;
    use crate::sql::create_table;
    use serde_json::json;

    fn widget() -> EntitySchema {
        EntitySchema::new("Widget", "widgets")
            .column(ColumnDescriptor::primary_key("id", "Integer"))
            .column(ColumnDescriptor::new("name", "String(255)"))
            .column(ColumnDescriptor::new("qty", "Integer"))
    }

    async fn pool_for(entities: &[EntitySchema]) -> SqlitePool {
        let pool = connect_in_memory().await.unwrap();
        for e in entities {
            sqlx::query(&create_table(e)).execute(&pool).await.unwrap();
        }
        pool
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM \"{}\"", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn sample_row_skips_identity_and_unknown() {
        let entity = widget().column(ColumnDescriptor::new("made_at", "DateTime"));
        assert_eq!(
            Seeder::sample_row(&entity),
            vec![("name".to_string(), json!("Sample Widget")), ("qty".to_string(), json!(1))]
        );
    }

    #[tokio::test]
    async fn seeds_empty_table_once() {
        let entities = [widget()];
        let pool = pool_for(&entities).await;

        let first = Seeder::seed_all(&pool, &entities).await.unwrap();
        assert_eq!(first, vec![SeedResult { entity: "Widget".into(), status: SeedStatus::Seeded }]);

        let (id, name, qty): (i64, String, i64) = sqlx::query_as("SELECT id, name, qty FROM widgets")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((id, name.as_str(), qty), (1, "Sample Widget", 1));

        let second = Seeder::seed_all(&pool, &entities).await.unwrap();
        assert_eq!(second[0].status, SeedStatus::AlreadyPopulated);
        assert_eq!(count(&pool, "widgets").await, 1);
    }

    #[tokio::test]
    async fn populated_table_is_left_alone() {
        let entities = [widget()];
        let pool = pool_for(&entities).await;
        sqlx::query("INSERT INTO widgets (name, qty) VALUES ('real', 9)")
            .execute(&pool)
            .await
            .unwrap();
        let results = Seeder::seed_all(&pool, &entities).await.unwrap();
        assert_eq!(results[0].status, SeedStatus::AlreadyPopulated);
        assert_eq!(count(&pool, "widgets").await, 1);
    }

    #[tokio::test]
    async fn identity_only_table_gets_default_row() {
        let entities = [EntitySchema::new("Marker", "markers").column(ColumnDescriptor::primary_key("id", "Integer"))];
        let pool = pool_for(&entities).await;
        let results = Seeder::seed_all(&pool, &entities).await.unwrap();
        assert_eq!(results[0].status, SeedStatus::Seeded);
        assert_eq!(count(&pool, "markers").await, 1);
    }

    #[tokio::test]
    async fn seeds_real_and_boolean_columns() {
        let entities = [EntitySchema::new("Flag", "flags")
            .column(ColumnDescriptor::primary_key("id", "Integer"))
            .column(ColumnDescriptor::new("ratio", "Float"))
            .column(ColumnDescriptor::new("enabled", "Boolean"))];
        let pool = pool_for(&entities).await;
        Seeder::seed_all(&pool, &entities).await.unwrap();
        let (ratio, enabled): (f64, bool) = sqlx::query_as("SELECT ratio, enabled FROM flags")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(ratio, 0.0);
        assert!(enabled);
    }

    #[tokio::test]
    async fn failure_is_isolated_per_entity() {
        // NOT NULL column of a type the resolver does not know: the insert must fail
        let broken = EntitySchema::new("Event", "events")
            .column(ColumnDescriptor::primary_key("id", "Integer"))
            .column(ColumnDescriptor::new("happened_at", "DateTime").not_null());
        let missing = EntitySchema::new("Ghost", "ghosts").column(ColumnDescriptor::primary_key("id", "Integer"));
        let pool = pool_for(&[broken.clone(), widget()]).await;

        let results = Seeder::seed_all(&pool, &[broken, missing, widget()]).await.unwrap();
        assert_eq!(results.len(), 3);
        assert!(matches!(&results[0].status, SeedStatus::Failed(r) if r.contains("NOT NULL")));
        assert!(matches!(&results[1].status, SeedStatus::Failed(r) if r.contains("no such table")));
        assert_eq!(results[2].status, SeedStatus::Seeded);
        assert_eq!(count(&pool, "events").await, 0);
        assert_eq!(count(&pool, "widgets").await, 1);
    }

    #[tokio::test]
    async fn closed_pool_aborts_seeding() {
        let entities = [widget()];
        let pool = pool_for(&entities).await;
        pool.close().await;
        let err = Seeder::seed_all(&pool, &entities).await.unwrap_err();
        assert!(err.is_connectivity());
    }
}
