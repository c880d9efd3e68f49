//! Placeholder values for seeding, inferred from a column's declared type.

use crate::config::{ColumnDescriptor, ColumnKind};
use serde_json::Value;

pub struct DefaultResolver;

impl DefaultResolver {
    /// Synthesized value for `column`, or `None` to leave it out of the insert.
    /// Identity columns are left to the database; unrecognized types are skipped.
    pub fn default_for(column: &ColumnDescriptor, entity_label: &str) -> Option<Value> {
        if column.primary_key {
            return None;
        }
        match column.kind() {
            ColumnKind::Text => Some(Value::String(format!("Sample {}", entity_label))),
            ColumnKind::Integer => Some(Value::from(1)),
            ColumnKind::Real => Some(Value::from(0.0)),
            ColumnKind::Boolean => Some(Value::Bool(true)),
            ColumnKind::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(declared: &str) -> Option<Value> {
        DefaultResolver::default_for(&ColumnDescriptor::new("c", declared), "Widget")
    }

    #[test]
    fn bounded_string_gets_sample_label() {
        assert_eq!(resolve("String(255)"), Some(json!("Sample Widget")));
    }

    #[test]
    fn numeric_and_boolean_defaults() {
        assert_eq!(resolve("Integer"), Some(json!(1)));
        assert_eq!(resolve("BigInteger"), Some(json!(1)));
        assert_eq!(resolve("Float(53)"), Some(json!(0.0)));
        assert_eq!(resolve("Double"), Some(json!(0.0)));
        assert_eq!(resolve("Boolean"), Some(json!(true)));
    }

    #[test]
    fn unknown_types_are_omitted() {
        assert_eq!(resolve("DateTime"), None);
        assert_eq!(resolve("LargeBinary"), None);
    }

    #[test]
    fn primary_key_is_omitted() {
        let pk = ColumnDescriptor::primary_key("id", "Integer");
        assert_eq!(DefaultResolver::default_for(&pk, "Widget"), None);
        let text_pk = ColumnDescriptor::primary_key("code", "String(8)");
        assert_eq!(DefaultResolver::default_for(&text_pk, "Widget"), None);
    }
}
