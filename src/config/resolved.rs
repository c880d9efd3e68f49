//! Resolved entity model: config validated and flattened for runtime use.

use crate::config::validate_entities;
use crate::error::ConfigError;
use std::collections::HashMap;

/// Semantic type class of a column, inferred from its declared type text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Real,
    Boolean,
    Other,
}

/// Keywords per kind, checked in this order; the first kind with a hit wins.
const KIND_KEYWORDS: &[(ColumnKind, &[&str])] = &[
    (ColumnKind::Text, &["string", "text", "char", "clob"]),
    (ColumnKind::Integer, &["integer", "bigint", "smallint", "tinyint"]),
    (ColumnKind::Real, &["float", "double", "real", "decimal", "numeric"]),
    (ColumnKind::Boolean, &["bool"]),
];

impl ColumnKind {
    /// Loose keyword match: `String(255)`, `VARCHAR(40)` and `Text` are all text.
    pub fn from_declared(declared: &str) -> ColumnKind {
        let lower = declared.to_lowercase();
        // bare INT has no longer keyword to hit
        let base = lower.split('(').next().unwrap_or("").trim();
        for (kind, keywords) in KIND_KEYWORDS {
            if keywords.iter().any(|k| lower.contains(k)) || (*kind == ColumnKind::Integer && base == "int") {
                return *kind;
            }
        }
        ColumnKind::Other
    }

    /// Column type used in CREATE TABLE.
    pub fn sql_type(self) -> Option<&'static str> {
        match self {
            ColumnKind::Text => Some("TEXT"),
            ColumnKind::Integer => Some("INTEGER"),
            ColumnKind::Real => Some("REAL"),
            ColumnKind::Boolean => Some("BOOLEAN"),
            ColumnKind::Other => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub declared_type: String,
    pub nullable: bool,
    pub primary_key: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        ColumnDescriptor {
            name: name.into(),
            declared_type: declared_type.into(),
            nullable: true,
            primary_key: false,
        }
    }

    /// Identity column, assumed to be generated by the database.
    pub fn primary_key(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        ColumnDescriptor {
            nullable: false,
            primary_key: true,
            ..ColumnDescriptor::new(name, declared_type)
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn kind(&self) -> ColumnKind {
        ColumnKind::from_declared(&self.declared_type)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntitySchema {
    /// Entity name used in placeholder text (e.g. `Widget`).
    pub label: String,
    /// Storage table name (e.g. `widgets`).
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl EntitySchema {
    pub fn new(label: impl Into<String>, table: impl Into<String>) -> Self {
        EntitySchema {
            label: label.into(),
            table: table.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.primary_key)
    }
}

/// Ordered, immutable set of entity schemas known to the application.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<EntitySchema>,
    by_table: HashMap<String, usize>,
}

impl EntityRegistry {
    pub fn builder() -> EntityRegistryBuilder {
        EntityRegistryBuilder::default()
    }

    /// Entities in registration order.
    pub fn entities(&self) -> &[EntitySchema] {
        &self.entities
    }

    pub fn by_table(&self, table: &str) -> Option<&EntitySchema> {
        self.by_table.get(table).map(|&i| &self.entities[i])
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[derive(Default)]
pub struct EntityRegistryBuilder {
    entities: Vec<EntitySchema>,
}

impl EntityRegistryBuilder {
    pub fn register(mut self, entity: EntitySchema) -> Self {
        self.entities.push(entity);
        self
    }

    /// Validates names, types and primary keys, then freezes the registry.
    pub fn build(self) -> Result<EntityRegistry, ConfigError> {
        validate_entities(&self.entities)?;
        let by_table = self
            .entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.table.clone(), i))
            .collect();
        Ok(EntityRegistry {
            entities: self.entities,
            by_table,
        })
    }
}
