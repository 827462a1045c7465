//! # Schema Validation
//!
//! Validates data documents against a schema held in a fully resolved
//! [`SchemaRegistry`], using the `jsonschema` crate as the engine.
//!
//! ## Reference Lookup
//!
//! The engine resolves every `$ref` to an absolute URI before asking for
//! it. A schema without `$id` gets the engine's default base
//! `json-schema:///`, so `{"$ref": "common"}` arrives as
//! `json-schema:///common`. [`RegistryRetriever`] maps those URIs back to
//! registry names and never touches the network; anything it cannot map is
//! a build error.

use std::collections::HashMap;
use std::fmt;

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;

use crate::error::SchemaError;
use crate::registry::SchemaRegistry;

/// Base URI the engine assigns to schemas that carry no `$id`.
const DEFAULT_BASE_URI: &str = "json-schema:///";

/// Retriever that answers `$ref` lookups from registry contents.
struct RegistryRetriever {
    /// Lookup key (registry name or `$id`) → schema.
    schemas: HashMap<String, Value>,
}

impl RegistryRetriever {
    fn new(registry: &SchemaRegistry) -> Self {
        let mut schemas = HashMap::new();
        for (name, schema) in registry.iter() {
            schemas.insert(name.to_string(), schema.clone());
            if let Some(id) = schema.get("$id").and_then(Value::as_str) {
                schemas.insert(id.trim_end_matches('#').to_string(), schema.clone());
            }
        }
        Self { schemas }
    }

    fn lookup(&self, uri: &str) -> Option<&Value> {
        let uri = uri.trim_end_matches('#');
        if let Some(schema) = self.schemas.get(uri) {
            return Some(schema);
        }

        let relative = uri.strip_prefix(DEFAULT_BASE_URI).unwrap_or(uri);
        let file_name = relative.rsplit('/').next().unwrap_or(relative);

        [relative, file_name]
            .into_iter()
            .flat_map(|candidate| {
                let stem = candidate.strip_suffix(".json");
                std::iter::once(candidate).chain(stem)
            })
            .find_map(|candidate| self.schemas.get(candidate))
    }
}

impl Retrieve for RegistryRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        match self.lookup(uri_str) {
            Some(schema) => Ok(schema.clone()),
            None => Err(format!("schema '{uri_str}' is not in the registry").into()),
        }
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Human-readable description from the engine.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl From<Vec<Violation>> for ValidationViolations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled schema, ready to validate documents.
///
/// Built from a registry that already holds every referenced schema; see
/// [`crate::resolve::resolve_references`].
pub struct SchemaValidator {
    schema_name: String,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile the registry entry `schema_name`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::NotRegistered`] if the name is unknown,
    /// [`SchemaError::ValidatorBuild`] if the engine rejects the schema or
    /// one of its references cannot be found in the registry.
    pub fn new(registry: &SchemaRegistry, schema_name: &str) -> Result<Self, SchemaError> {
        let schema = registry
            .get(schema_name)
            .ok_or_else(|| SchemaError::NotRegistered {
                name: schema_name.to_string(),
            })?;

        let validator = build_options(registry).build(schema).map_err(|e| {
            SchemaError::ValidatorBuild {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            schema_name: schema_name.to_string(),
            validator,
        })
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Every violation of `instance`, empty when it conforms.
    pub fn violations(&self, instance: &Value) -> ValidationViolations {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Validate `instance`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::ValidationFailed`] with every violation when the
    /// document does not conform.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaError> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations,
            })
        }
    }
}

fn build_options(registry: &SchemaRegistry) -> ValidationOptions {
    let mut opts = jsonschema::options();
    opts.with_retriever(RegistryRetriever::new(registry));
    opts
}
