//! Schema types describing the record layout of a container.
//!
//! A [`Schema`] is an opaque handle from the orchestrator's point of view:
//! the core only threads it from the open stream to the stages, which use
//! it during `initialize` to declare the fields they will read or write.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handle to the schema of the current source.
///
/// Cloned cheaply when a stream binds a [`Record`](crate::Record) or hands
/// the schema to stages.
pub type SchemaRef = Arc<Schema>;

/// Value kind of a single record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    String,
}

/// One field of a record layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,

    /// Value kind.
    pub kind: FieldKind,
}

impl Field {
    /// Create a new field definition.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Record layout of one container source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a schema from a list of fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check whether a field exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wrap the schema in a shared handle.
    pub fn into_ref(self) -> SchemaRef {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new(vec![
            Field::new("track_id", FieldKind::Int),
            Field::new("energy", FieldKind::Float),
            Field::new("label", FieldKind::String),
        ])
    }

    #[test]
    fn test_field_lookup() {
        let schema = sample();
        assert_eq!(schema.len(), 3);
        assert!(schema.has_field("energy"));
        assert!(!schema.has_field("momentum"));
        assert_eq!(schema.field("track_id").unwrap().kind, FieldKind::Int);
    }

    #[test]
    fn test_serde_roundtrip() {
        let schema = sample();
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("\"kind\":\"float\""));
        let back: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);
    }
}
