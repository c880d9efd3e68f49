//! SQLite row decoding into ordered JSON records.

use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, ValueRef};

/// One row as an ordered column name -> value mapping.
pub type RowRecord = Map<String, Value>;

pub fn column_names(row: &SqliteRow) -> Vec<String> {
    row.columns().iter().map(|c| c.name().to_string()).collect()
}

pub fn row_to_record(row: &SqliteRow) -> RowRecord {
    let mut map = Map::new();
    for (idx, col) in row.columns().iter().enumerate() {
        map.insert(col.name().to_string(), cell_to_value(row, idx));
    }
    map
}

/// Decoded by the value's storage class, not the declared column type.
fn cell_to_value(row: &SqliteRow, idx: usize) -> Value {
    let is_null = row.try_get_raw(idx).map(|v| v.is_null()).unwrap_or(true);
    if is_null {
        return Value::Null;
    }
    if let Ok(n) = row.try_get::<i64, _>(idx) {
        return Value::Number(n.into());
    }
    if let Ok(f) = row.try_get::<f64, _>(idx) {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
        return Value::String(f.to_string());
    }
    if let Ok(s) = row.try_get::<String, _>(idx) {
        return Value::String(s);
    }
    if let Ok(bytes) = row.try_get::<Vec<u8>, _>(idx) {
        return Value::String(hex(&bytes));
    }
    Value::Null
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use serde_json::json;

    #[tokio::test]
    async fn decodes_each_storage_class_in_column_order() {
        let pool = connect_in_memory().await.unwrap();
        let row = sqlx::query("SELECT 7 AS z, 1.5 AS a, 'txt' AS m, NULL AS n, x'beef' AS b")
            .fetch_one(&pool)
            .await
            .unwrap();
        let record = row_to_record(&row);
        assert_eq!(column_names(&row), ["z", "a", "m", "n", "b"]);
        assert_eq!(record.keys().collect::<Vec<_>>(), ["z", "a", "m", "n", "b"]);
        assert_eq!(
            Value::Object(record),
            json!({ "z": 7, "a": 1.5, "m": "txt", "n": null, "b": "beef" })
        );
    }
}
