//! Builds DDL, COUNT, INSERT and SELECT statements for entities and catalog tables.

use crate::catalog::ValidatedTable;
use crate::config::{ColumnDescriptor, EntitySchema};
use serde_json::Value;

/// Quote identifier for SQLite. Names come from validated config or the live catalog only.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn column_def(c: &ColumnDescriptor) -> String {
    let typ = c.kind().sql_type().map(String::from).unwrap_or_else(|| c.declared_type.trim().to_string());
    let mut def = format!("{} {}", quoted(&c.name), typ);
    if c.primary_key {
        // INTEGER PRIMARY KEY aliases the rowid and is assigned on insert
        def.push_str(" PRIMARY KEY");
    } else if !c.nullable {
        def.push_str(" NOT NULL");
    }
    def
}

/// CREATE TABLE IF NOT EXISTS from the entity's columns, in declaration order.
pub fn create_table(entity: &EntitySchema) -> String {
    let defs: Vec<String> = entity.columns.iter().map(column_def).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(&entity.table),
        defs.join(",\n  ")
    )
}

pub fn count_rows(entity: &EntitySchema) -> String {
    format!("SELECT COUNT(*) FROM {}", quoted(&entity.table))
}

/// INSERT of one row with positional parameters; `DEFAULT VALUES` when no column is given.
pub fn insert_row(entity: &EntitySchema, values: &[(String, Value)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = quoted(&entity.table);
    if values.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES", table);
        return q;
    }
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (name, val) in values {
        let n = q.push_param(val.clone());
        cols.push(quoted(name));
        placeholders.push(format!("?{}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// SELECT * with a row cap and no ORDER BY (storage order).
pub fn select_preview(table: &ValidatedTable, limit: u32) -> String {
    format!("SELECT * FROM {} LIMIT {}", quoted(table.as_str()), limit)
}

pub fn select_all(table: &ValidatedTable) -> String {
    format!("SELECT * FROM {}", quoted(table.as_str()))
}
