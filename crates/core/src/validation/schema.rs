//! Declarative rule schemas loaded from JSON.
//!
//! ```json
//! {
//!   "Course": {
//!     "title": ["required", {"max_length": 80}],
//!     "price": ["required", "positive"]
//!   }
//! }
//! ```
//!
//! Unknown rule tags are rejected when the schema is parsed. A field or type
//! listed more than once keeps every rule, in document order.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::registry::{FieldRuleMap, Registry};
use super::rules::Rule;
use crate::error::CoreError;
use crate::types::TypeKey;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    pub types: IndexMap<TypeKey, FieldRuleMap>,
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SchemaVisitor)
    }
}

struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of type names to field rules")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schema, A::Error> {
        let mut schema = Schema::default();
        while let Some((type_key, fields)) = access.next_entry::<TypeKey, AppendedFields>()? {
            let entry = schema.types.entry(type_key).or_default();
            for (field, rules) in fields.0 {
                entry.entry(field).or_default().extend(rules);
            }
        }
        Ok(schema)
    }
}

/// Field rules of one type; a repeated field name appends instead of replacing.
struct AppendedFields(FieldRuleMap);

impl<'de> Deserialize<'de> for AppendedFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldsVisitor)
    }
}

struct FieldsVisitor;

impl<'de> Visitor<'de> for FieldsVisitor {
    type Value = AppendedFields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field names to rule lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AppendedFields, A::Error> {
        let mut fields = FieldRuleMap::new();
        while let Some((field, rules)) = access.next_entry::<String, Vec<Rule>>()? {
            fields.entry(field).or_default().extend(rules);
        }
        Ok(AppendedFields(fields))
    }
}

impl Schema {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Total number of rules across all types and fields.
    pub fn rule_count(&self) -> usize {
        self.types
            .values()
            .flat_map(|fields| fields.values())
            .map(Vec::len)
            .sum()
    }
}

impl Registry {
    /// Append every rule of `schema`, keeping the schema's order.
    pub fn apply_schema(&mut self, schema: &Schema) -> &mut Self {
        for (type_key, fields) in &schema.types {
            let mut rules = self.rules_of(type_key.clone());
            for (field, field_rules) in fields {
                rules.field_all(field.clone(), field_rules.iter().cloned());
            }
        }
        tracing::debug!(
            types = schema.types.len(),
            rules = schema.rule_count(),
            "Applied schema",
        );
        self
    }

    pub fn from_schema(schema: &Schema) -> Self {
        let mut registry = Self::new();
        registry.apply_schema(schema);
        registry
    }
}
