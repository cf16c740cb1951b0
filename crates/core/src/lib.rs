//! `fieldrules-core` -- rule registry and validation engine.
//!
//! Pure logic with no I/O beyond optional schema loading.

pub mod error;
pub mod types;
pub mod validation;

pub use error::CoreError;
pub use types::{FieldName, TypeKey};
pub use validation::candidate::{Candidate, Record, Validated};
pub use validation::evaluator::{validate, Evaluator};
pub use validation::registry::{FieldRuleMap, Registry, TypeRules};
pub use validation::rules::{FieldViolation, Rule, ValidationReport};
pub use validation::schema::Schema;
