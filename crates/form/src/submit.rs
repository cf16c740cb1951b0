//! Form submission: decode the posted record, validate it, render the verdict.

use fieldrules_core::{CoreError, Evaluator, Record, Registry, Schema, TypeKey, ValidationReport};
use serde_json::Value;

use crate::config::FormConfig;
use crate::course::builtin_registry;

/// Shown to the user whenever a submission fails validation.
pub const RETRY_MESSAGE: &str = "Invalid input, please try again!";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Submitted data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Submitted data must be a JSON object")]
    NotAnObject,
}

/// Validates submitted records of one type against a registry built at startup.
#[derive(Debug)]
pub struct FormHandler {
    registry: Registry,
    type_key: TypeKey,
    report: bool,
}

impl FormHandler {
    pub fn new(registry: Registry, type_key: TypeKey, report: bool) -> Self {
        Self {
            registry,
            type_key,
            report,
        }
    }

    /// Build the registry from the configured schema, or the built-in rules.
    pub fn from_config(config: &FormConfig) -> Result<Self, CoreError> {
        let registry = match &config.schema_path {
            Some(path) => {
                let schema = Schema::from_path(path)?;
                tracing::info!(
                    path = %path.display(),
                    types = schema.types.len(),
                    rules = schema.rule_count(),
                    "Loaded rule schema",
                );
                Registry::from_schema(&schema)
            }
            None => builtin_registry(),
        };

        if registry.lookup(&config.type_key).is_empty() {
            tracing::warn!(
                type_key = %config.type_key,
                "No rules registered for type -- every submission will be accepted",
            );
        }

        Ok(Self::new(registry, config.type_key.clone(), config.report))
    }

    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    /// Decode `input` as a JSON object and check it.
    pub fn submit(&self, input: &str) -> Result<ValidationReport, SubmitError> {
        let value: Value = serde_json::from_str(input)?;
        let record =
            Record::from_value(self.type_key.clone(), value).ok_or(SubmitError::NotAnObject)?;

        let report = Evaluator::new(&self.registry).check_dynamic(&record);
        tracing::info!(
            type_key = %self.type_key,
            checked = report.checked,
            violations = report.violations.len(),
            valid = report.is_valid(),
            "Submission checked",
        );
        Ok(report)
    }

    /// User-facing text for a verdict.
    pub fn render(&self, report: &ValidationReport) -> String {
        if report.is_valid() {
            return format!("{} accepted", report.type_key);
        }
        if !self.report {
            return RETRY_MESSAGE.to_string();
        }

        let mut out = String::from(RETRY_MESSAGE);
        for violation in &report.violations {
            out.push_str("\n  - ");
            out.push_str(&violation.message);
        }
        out
    }
}
