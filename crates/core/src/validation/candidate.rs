//! Records that can be offered for validation.

use serde_json::{Map, Value};

use super::registry::TypeRules;
use crate::types::TypeKey;

/// Anything whose fields can be read by name at validation time.
///
/// Returning `None` means the field is absent; every rule on an absent
/// field fails.
pub trait Candidate {
    fn field_value(&self, field: &str) -> Option<Value>;
}

/// A typed record that declares its own rules.
///
/// `declare_rules` is called once per registry by
/// [`Registry::register`](super::registry::Registry::register).
pub trait Validated: Candidate {
    const TYPE_KEY: TypeKey;

    fn declare_rules(rules: &mut TypeRules<'_>);
}

impl Candidate for Map<String, Value> {
    fn field_value(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

impl<C: Candidate + ?Sized> Candidate for &C {
    fn field_value(&self, field: &str) -> Option<Value> {
        (**self).field_value(field)
    }
}

/// An untyped record whose type is only known at runtime, e.g. a decoded
/// form post.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub type_key: TypeKey,
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(type_key: impl Into<TypeKey>, fields: Map<String, Value>) -> Self {
        Self {
            type_key: type_key.into(),
            fields,
        }
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(type_key: impl Into<TypeKey>, value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(type_key, fields)),
            _ => None,
        }
    }
}

impl Candidate for Record {
    fn field_value(&self, field: &str) -> Option<Value> {
        self.fields.field_value(field)
    }
}
