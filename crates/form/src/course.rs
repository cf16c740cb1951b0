//! Built-in `Course` record and the registry used when no schema is configured.

use fieldrules_core::{Candidate, Registry, Rule, TypeKey, TypeRules, Validated};
use serde_json::{json, Value};

/// A course offering submitted through the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub title: String,
    pub price: f64,
}

impl Course {
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
        }
    }
}

impl Candidate for Course {
    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "title" => Some(json!(self.title)),
            "price" => Some(json!(self.price)),
            _ => None,
        }
    }
}

impl Validated for Course {
    const TYPE_KEY: TypeKey = TypeKey::from_static("Course");

    fn declare_rules(rules: &mut TypeRules<'_>) {
        rules
            .field("title", Rule::Required)
            .field_all("price", [Rule::Required, Rule::Positive]);
    }
}

/// Registry holding only the built-in record types.
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register::<Course>();
    registry
}
