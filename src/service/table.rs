//! Table preview and CSV export for any table in the live catalog.

use crate::catalog::{CatalogReader, ValidatedTable};
use crate::error::AppError;
use crate::service::rows::{column_names, row_to_record, RowRecord};
use crate::sql::{select_all, select_preview};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

pub const PREVIEW_LIMIT: u32 = 100;

/// Rendered CSV attachment.
pub struct CsvExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct TableService;

impl TableService {
    /// First `PREVIEW_LIMIT` rows in storage order.
    pub async fn preview(pool: &SqlitePool, table_name: &str) -> Result<Vec<RowRecord>, AppError> {
        let table = CatalogReader::require_table(pool, table_name).await?;
        let rows = Self::fetch(pool, &select_preview(&table, PREVIEW_LIMIT)).await?;
        Ok(rows.iter().map(row_to_record).collect())
    }

    /// Every row as CSV: header of column names, then one line per row.
    pub async fn export_csv(pool: &SqlitePool, table_name: &str) -> Result<CsvExport, AppError> {
        let table = CatalogReader::require_table(pool, table_name).await?;
        let rows = Self::fetch(pool, &select_all(&table)).await?;
        if rows.is_empty() {
            return Err(AppError::NoData(table.to_string()));
        }
        let bytes = render_csv(&rows)?;
        Ok(CsvExport {
            file_name: csv_file_name(&table),
            bytes,
        })
    }

    async fn fetch(pool: &SqlitePool, sql: &str) -> Result<Vec<SqliteRow>, AppError> {
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query(sql).fetch_all(pool).await?)
    }
}

fn csv_file_name(table: &ValidatedTable) -> String {
    format!("{}.csv", table)
}

fn render_csv(rows: &[SqliteRow]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if let Some(first) = rows.first() {
        writer.write_record(column_names(first))?;
    }
    for row in rows {
        let record = row_to_record(row);
        writer.write_record(record.values().map(csv_field))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Export(csv::Error::from(e.into_error())))
}

fn csv_field(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use serde_json::json;

    async fn widgets_pool(rows: usize) -> SqlitePool {
        let pool = connect_in_memory().await.unwrap();
        sqlx::query("CREATE TABLE widgets (id INTEGER PRIMARY KEY, name TEXT, qty INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        for i in 0..rows {
            sqlx::query("INSERT INTO widgets (name, qty) VALUES (?1, ?2)")
                .bind(format!("w{}", i))
                .bind(i as i64)
                .execute(&pool)
                .await
                .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn preview_caps_at_limit() {
        let pool = widgets_pool(150).await;
        let rows = TableService::preview(&pool, "widgets").await.unwrap();
        assert_eq!(rows.len(), PREVIEW_LIMIT as usize);
        assert_eq!(Value::Object(rows[0].clone()), json!({ "id": 1, "name": "w0", "qty": 0 }));
    }

    #[tokio::test]
    async fn preview_of_every_live_table_succeeds() {
        let pool = widgets_pool(3).await;
        sqlx::query("CREATE TABLE empty_things (id INTEGER PRIMARY KEY AUTOINCREMENT)")
            .execute(&pool)
            .await
            .unwrap();
        for table in CatalogReader::list_tables(&pool).await.unwrap() {
            let rows = TableService::preview(&pool, &table).await.unwrap();
            assert!(rows.len() <= PREVIEW_LIMIT as usize);
        }
    }

    #[tokio::test]
    async fn unknown_table_is_rejected_before_querying() {
        let pool = widgets_pool(1).await;
        let injected = "widgets; DROP TABLE widgets; --";
        assert!(matches!(
            TableService::preview(&pool, injected).await,
            Err(AppError::InvalidTable(_))
        ));
        assert!(matches!(
            TableService::export_csv(&pool, injected).await,
            Err(AppError::InvalidTable(_))
        ));
        assert!(CatalogReader::table_exists(&pool, "widgets").await.unwrap());
    }

    #[tokio::test]
    async fn export_renders_header_and_rows() {
        let pool = widgets_pool(0).await;
        sqlx::query("INSERT INTO widgets (name, qty) VALUES ('Sample Widget', 1)")
            .execute(&pool)
            .await
            .unwrap();
        let export = TableService::export_csv(&pool, "widgets").await.unwrap();
        assert_eq!(export.file_name, "widgets.csv");
        let text = String::from_utf8(export.bytes).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), ["id,name,qty", "1,Sample Widget,1"]);
    }

    #[tokio::test]
    async fn export_quotes_delimiters_and_blanks_nulls() {
        let pool = widgets_pool(0).await;
        sqlx::query("INSERT INTO widgets (name, qty) VALUES ('a, \"b\"', NULL)")
            .execute(&pool)
            .await
            .unwrap();
        let export = TableService::export_csv(&pool, "widgets").await.unwrap();
        let text = String::from_utf8(export.bytes).unwrap();
        assert_eq!(text.lines().nth(1), Some("1,\"a, \"\"b\"\"\","));
    }

    #[tokio::test]
    async fn export_of_empty_table_is_no_data() {
        let pool = widgets_pool(0).await;
        assert!(matches!(
            TableService::export_csv(&pool, "widgets").await,
            Err(AppError::NoData(t)) if t == "widgets"
        ));
    }
}
