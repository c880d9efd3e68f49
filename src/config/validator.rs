//! Entity validation: identifiers, declared types, duplicates and primary keys.

use crate::config::EntitySchema;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

type Compiled = OnceLock<Result<Regex, regex::Error>>;

fn compiled(cell: &'static Compiled, pattern: &str) -> Result<&'static Regex, ConfigError> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| ConfigError::Pattern(e.to_string()))
}

fn identifier_re() -> Result<&'static Regex, ConfigError> {
    static RE: Compiled = OnceLock::new();
    compiled(&RE, r"^[A-Za-z_][A-Za-z0-9_]*$")
}

fn declared_type_re() -> Result<&'static Regex, ConfigError> {
    static RE: Compiled = OnceLock::new();
    compiled(&RE, r"^[A-Za-z][A-Za-z0-9_ ]*(\(\s*\d+\s*(,\s*\d+\s*)?\))?$")
}

/// Identifiers end up in DDL and INSERT statements, so only plain names are accepted.
pub fn is_valid_identifier(name: &str) -> bool {
    identifier_re().is_ok_and(|re| re.is_match(name))
}

pub fn validate_entities(entities: &[EntitySchema]) -> Result<(), ConfigError> {
    let identifier = identifier_re()?;
    let declared_type = declared_type_re()?;
    let mut tables = HashSet::new();
    for e in entities {
        if !identifier.is_match(&e.table) {
            return Err(ConfigError::InvalidIdentifier {
                kind: "table",
                name: e.table.clone(),
            });
        }
        if e.table.to_lowercase().starts_with("sqlite_") {
            return Err(ConfigError::InvalidIdentifier {
                kind: "table",
                name: e.table.clone(),
            });
        }
        if !tables.insert(e.table.to_lowercase()) {
            return Err(ConfigError::DuplicateTable(e.table.clone()));
        }
        if e.columns.is_empty() {
            return Err(ConfigError::EmptyEntity(e.table.clone()));
        }

        let mut columns = HashSet::new();
        for c in &e.columns {
            if !identifier.is_match(&c.name) {
                return Err(ConfigError::InvalidIdentifier {
                    kind: "column",
                    name: format!("{}.{}", e.table, c.name),
                });
            }
            if !declared_type.is_match(c.declared_type.trim()) {
                return Err(ConfigError::InvalidType {
                    table: e.table.clone(),
                    column: c.name.clone(),
                    declared: c.declared_type.clone(),
                });
            }
            if !columns.insert(c.name.to_lowercase()) {
                return Err(ConfigError::DuplicateColumn {
                    table: e.table.clone(),
                    column: c.name.clone(),
                });
            }
        }

        let pks: Vec<String> = e
            .columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.clone())
            .collect();
        if pks.len() > 1 {
            return Err(ConfigError::MultiplePrimaryKeys {
                table: e.table.clone(),
                columns: pks,
            });
        }
    }
    Ok(())
}
