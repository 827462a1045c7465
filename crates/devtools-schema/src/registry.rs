//! # Schema Registry
//!
//! Name → schema map for a single validation run. The registry is built
//! empty, filled by [`crate::resolve::resolve_references`], and handed to
//! [`crate::validate::SchemaValidator`] once every referenced name is
//! present.
//!
//! ## Reference Names
//!
//! A reference name is the document part of a `$ref` string, i.e. the text
//! before `#`. `{"$ref": "common#/definitions/port"}` names `common`.
//! Purely local refs (`#/definitions/port`) name nothing, and neither do
//! the JSON Schema meta-schemas on `json-schema.org`, which the engine
//! ships with.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// Hosts whose schemas are built into the validation engine.
const META_SCHEMA_PREFIXES: &[&str] = &["http://json-schema.org/", "https://json-schema.org/"];

/// Process-scoped set of schemas known to one validation run.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Value>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `schema` under `name`.
    ///
    /// Returns `false` and leaves the registry unchanged when the name is
    /// already taken; the first registration wins.
    pub fn register(&mut self, name: impl Into<String>, schema: Value) -> bool {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return false;
        }
        tracing::debug!(schema = %name, "registered schema");
        self.schemas.insert(name, schema);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Iterate `(name, schema)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Names referenced by any registered schema but not registered yet.
    pub fn missing_references(&self) -> BTreeSet<String> {
        let mut missing = BTreeSet::new();
        for schema in self.schemas.values() {
            missing.extend(referenced_names(schema));
        }
        missing.retain(|name| !self.contains(name));
        missing
    }
}

/// Every external schema name a document references, at any depth.
pub fn referenced_names(schema: &Value) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    collect_references(schema, &mut names);
    names
}

fn collect_references(value: &Value, names: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "$ref" {
                    if let Some(name) = child.as_str().and_then(reference_name) {
                        names.insert(name.to_string());
                    }
                } else {
                    collect_references(child, names);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_references(item, names);
            }
        }
        _ => {}
    }
}

/// Extract the document name from a `$ref` value, if it names one.
pub fn reference_name(reference: &str) -> Option<&str> {
    let document = reference.split('#').next().unwrap_or_default().trim();
    if document.is_empty() {
        return None;
    }
    if META_SCHEMA_PREFIXES.iter().any(|p| document.starts_with(p)) {
        return None;
    }
    Some(document)
}
