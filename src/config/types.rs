//! Raw entity config types matching the entities JSON file.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnTypeConfig {
    Simple(String),
    Parameterized { name: String, params: Option<Vec<u32>> },
}

impl ColumnTypeConfig {
    /// Declared type as written in a schema, e.g. `String(255)`.
    pub fn declared(&self) -> String {
        match self {
            ColumnTypeConfig::Simple(s) => s.trim().to_string(),
            ColumnTypeConfig::Parameterized { name, params } => {
                let p = params
                    .as_ref()
                    .map(|v| v.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", "))
                    .unwrap_or_default();
                if p.is_empty() {
                    name.trim().to_string()
                } else {
                    format!("{}({})", name.trim(), p)
                }
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: ColumnTypeConfig,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Human entity name used in placeholder text. Derived from `table` when absent.
    #[serde(default)]
    pub label: Option<String>,
    pub table: String,
    pub columns: Vec<ColumnConfig>,
}
