//! Validation rule and report types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::TypeKey;

/// A single check that can be attached to a field.
///
/// Serialized as a bare tag for unit rules (`"required"`) and as a
/// single-key object for parameterised ones (`{"min_length": 3}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Value must be truthy: present, non-null, non-empty, non-zero, not `false`.
    Required,
    /// Value must be a number strictly greater than zero.
    Positive,
    /// String with at least this many characters.
    MinLength(u64),
    /// String with at most this many characters.
    MaxLength(u64),
    /// Number greater than or equal to the bound.
    MinValue(f64),
    /// Number less than or equal to the bound.
    MaxValue(f64),
    /// Value must equal one of the listed values.
    OneOf(Vec<Value>),
}

impl Rule {
    /// Stable tag name matching serde's `rename_all = "snake_case"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Positive => "positive",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::MinValue(_) => "min_value",
            Self::MaxValue(_) => "max_value",
            Self::OneOf(_) => "one_of",
        }
    }

    /// Human-readable failure message for `field`.
    pub fn message(&self, field: &str) -> String {
        match self {
            Self::Required => format!("{field} is required"),
            Self::Positive => format!("{field} must be a positive number"),
            Self::MinLength(n) => format!("{field} must be at least {n} characters"),
            Self::MaxLength(n) => format!("{field} must be at most {n} characters"),
            Self::MinValue(x) => format!("{field} must be at least {x}"),
            Self::MaxValue(x) => format!("{field} must be at most {x}"),
            Self::OneOf(values) => {
                let allowed: Vec<String> = values.iter().map(Value::to_string).collect();
                format!("{field} must be one of {}", allowed.join(", "))
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: Rule,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Aggregated result of evaluating every rule registered for a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub type_key: TypeKey,
    /// Number of rules evaluated, including the passing ones.
    pub checked: usize,
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn new(type_key: TypeKey) -> Self {
        Self {
            type_key,
            checked: 0,
            violations: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations recorded against one field, in rule order.
    pub fn violations_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.field == field)
    }
}
