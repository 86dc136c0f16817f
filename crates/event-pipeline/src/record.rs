//! The reusable unit-of-work container.
//!
//! One [`Record`] is constructed per run and rebound to each new source's
//! schema at file boundaries. Between units it is cleared, not reallocated,
//! so stages may keep cross-unit caches keyed off its stable identity.

use crate::schema::SchemaRef;
use serde_json::Value;
use std::collections::HashMap;

/// The current unit of work in flight.
#[derive(Debug, Default)]
pub struct Record {
    schema: Option<SchemaRef>,
    values: HashMap<String, Value>,
}

impl Record {
    /// Create an empty, unbound record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebind to a new source's schema, dropping any leftover values.
    pub fn bind(&mut self, schema: SchemaRef) {
        self.schema = Some(schema);
        self.values.clear();
    }

    /// Schema of the source this record is bound to, if any.
    pub fn schema(&self) -> Option<&SchemaRef> {
        self.schema.as_ref()
    }

    /// Clear per-unit state. The schema binding and the map allocation
    /// are retained.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Set a field value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Remove and return a field value.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Iterate over the populated fields.
    pub fn values(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Keep only the fields for which the predicate returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.values.retain(|name, _| keep(name));
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fields are populated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldKind, Schema};
    use serde_json::json;

    fn schema() -> SchemaRef {
        Schema::new(vec![Field::new("n", FieldKind::Int)]).into_ref()
    }

    #[test]
    fn test_clear_retains_binding() {
        let mut record = Record::new();
        record.bind(schema());
        record.set("n", json!(7));
        assert_eq!(record.len(), 1);

        record.clear();
        assert!(record.is_empty());
        assert!(record.schema().is_some());
    }

    #[test]
    fn test_bind_drops_leftover_values() {
        let mut record = Record::new();
        record.set("stale", json!("previous file"));
        record.bind(schema());
        assert!(record.get("stale").is_none());
    }

    #[test]
    fn test_set_get_take() {
        let mut record = Record::new();
        record.set("n", json!(42));
        assert_eq!(record.get("n"), Some(&json!(42)));
        assert_eq!(record.take("n"), Some(json!(42)));
        assert!(record.get("n").is_none());
    }

    #[test]
    fn test_retain() {
        let mut record = Record::new();
        record.set("a", json!(1));
        record.set("b", json!(2));
        record.retain(|name| name == "a");
        assert_eq!(record.len(), 1);
        assert!(record.get("a").is_some());
    }
}
