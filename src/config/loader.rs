//! Load entity config from JSON and resolve it into an `EntityRegistry`.

use crate::case::to_pascal_case;
use crate::config::types::EntityConfig;
use crate::config::{ColumnDescriptor, EntityRegistry, EntitySchema};
use crate::error::ConfigError;
use std::path::Path;

/// Build the registry from raw config, keeping file order.
pub fn resolve(configs: &[EntityConfig]) -> Result<EntityRegistry, ConfigError> {
    let mut builder = EntityRegistry::builder();
    for cfg in configs {
        let label = cfg
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .unwrap_or_else(|| to_pascal_case(&cfg.table));
        let columns = cfg
            .columns
            .iter()
            .map(|c| ColumnDescriptor {
                name: c.name.clone(),
                declared_type: c.type_.declared(),
                nullable: c.nullable && !c.primary_key,
                primary_key: c.primary_key,
            })
            .collect();
        builder = builder.register(EntitySchema {
            label,
            table: cfg.table.clone(),
            columns,
        });
    }
    builder.build()
}

pub fn parse_entities(json: &str) -> Result<Vec<EntityConfig>, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Read and resolve an entities JSON file (an array of entity objects).
pub async fn load_from_path(path: impl AsRef<Path>) -> Result<EntityRegistry, ConfigError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading entities");
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    let configs = parse_entities(&raw)?;
    resolve(&configs)
}
