//! Rule evaluator — pure logic over a registry snapshot and a candidate.

use serde_json::Value;
use validator::{ValidateLength, ValidateRange};

use super::candidate::{Candidate, Record, Validated};
use super::registry::Registry;
use super::rules::{FieldViolation, Rule, ValidationReport};
use crate::types::TypeKey;

/// Checks candidates against the rules of a [`Registry`].
///
/// Every rule on every field is evaluated, even after the first failure.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
    registry: &'r Registry,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// `true` when every rule registered for `type_key` passes.
    ///
    /// Types without rules are vacuously valid.
    pub fn validate<C: Candidate + ?Sized>(&self, candidate: &C, type_key: &TypeKey) -> bool {
        self.check(candidate, type_key).is_valid()
    }

    /// Evaluate every registered rule and collect the failures.
    pub fn check<C: Candidate + ?Sized>(&self, candidate: &C, type_key: &TypeKey) -> ValidationReport {
        let mut report = ValidationReport::new(type_key.clone());

        for (field, rules) in self.registry.lookup(type_key) {
            let value = candidate.field_value(field);
            for rule in rules {
                report.checked += 1;
                if !evaluate_rule(rule, value.as_ref()) {
                    tracing::debug!(
                        type_key = %type_key,
                        field = %field,
                        rule = %rule,
                        "Rule failed",
                    );
                    report.violations.push(FieldViolation {
                        field: field.clone(),
                        rule: rule.clone(),
                        message: rule.message(field),
                        value: value.clone(),
                    });
                }
            }
        }

        report
    }

    pub fn validate_record<T: Validated>(&self, record: &T) -> bool {
        self.validate(record, &T::TYPE_KEY)
    }

    pub fn check_record<T: Validated>(&self, record: &T) -> ValidationReport {
        self.check(record, &T::TYPE_KEY)
    }

    /// Check an untyped record against the rules of its own type key.
    pub fn check_dynamic(&self, record: &Record) -> ValidationReport {
        self.check(record, &record.type_key)
    }
}

/// Evaluate a single rule against a field value. `None` means the field is
/// missing, which fails every rule.
pub fn evaluate_rule(rule: &Rule, value: Option<&Value>) -> bool {
    let Some(value) = value else {
        return false;
    };

    match rule {
        Rule::Required => is_truthy(value),
        Rule::Positive => value
            .as_f64()
            .is_some_and(|n| n.validate_range(None, None, Some(0.0), None)),
        Rule::MinLength(min) => value
            .as_str()
            .is_some_and(|s| s.validate_length(Some(*min), None, None)),
        Rule::MaxLength(max) => value
            .as_str()
            .is_some_and(|s| s.validate_length(None, Some(*max), None)),
        Rule::MinValue(min) => value
            .as_f64()
            .is_some_and(|n| n.validate_range(Some(*min), None, None, None)),
        Rule::MaxValue(max) => value
            .as_f64()
            .is_some_and(|n| n.validate_range(None, Some(*max), None, None)),
        Rule::OneOf(allowed) => allowed.contains(value),
    }
}

/// Truthiness of a dynamic value: `null`, `false`, `""` and numeric zero are
/// falsy, everything else (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Convenience for one-off checks without holding an [`Evaluator`].
pub fn validate<C: Candidate + ?Sized>(registry: &Registry, candidate: &C, type_key: &TypeKey) -> bool {
    Evaluator::new(registry).validate(candidate, type_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    const COURSE: TypeKey = TypeKey::from_static("Course");

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn course_registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .rules_of(COURSE)
            .field("title", Rule::Required)
            .field_all("price", [Rule::Required, Rule::Positive]);
        registry
    }

    #[test]
    fn required_falsy_values_fail() {
        for value in [json!(""), json!(0), json!(0.0), json!(null), json!(false)] {
            assert!(!evaluate_rule(&Rule::Required, Some(&value)), "{value} passed");
        }
        assert!(!evaluate_rule(&Rule::Required, None));
    }

    #[test]
    fn required_truthy_values_pass() {
        for value in [json!("Go"), json!(1), json!(-3.5), json!(true), json!([]), json!({})] {
            assert!(evaluate_rule(&Rule::Required, Some(&value)), "{value} failed");
        }
    }

    #[test]
    fn positive_requires_number_above_zero() {
        assert!(evaluate_rule(&Rule::Positive, Some(&json!(10))));
        assert!(evaluate_rule(&Rule::Positive, Some(&json!(0.01))));
        assert!(!evaluate_rule(&Rule::Positive, Some(&json!(0))));
        assert!(!evaluate_rule(&Rule::Positive, Some(&json!(-1))));
        assert!(!evaluate_rule(&Rule::Positive, Some(&json!("10"))));
        assert!(!evaluate_rule(&Rule::Positive, Some(&json!(null))));
        assert!(!evaluate_rule(&Rule::Positive, None));
    }

    #[test]
    fn length_bounds_count_characters() {
        assert!(evaluate_rule(&Rule::MinLength(2), Some(&json!("Go"))));
        assert!(!evaluate_rule(&Rule::MinLength(3), Some(&json!("Go"))));
        assert!(evaluate_rule(&Rule::MaxLength(2), Some(&json!("Gö"))));
        assert!(!evaluate_rule(&Rule::MaxLength(1), Some(&json!("Go"))));
        assert!(!evaluate_rule(&Rule::MinLength(0), Some(&json!(42))));
    }

    #[test]
    fn value_bounds_are_inclusive() {
        assert!(evaluate_rule(&Rule::MinValue(1.0), Some(&json!(1))));
        assert!(!evaluate_rule(&Rule::MinValue(1.0), Some(&json!(0.5))));
        assert!(evaluate_rule(&Rule::MaxValue(100.0), Some(&json!(100))));
        assert!(!evaluate_rule(&Rule::MaxValue(100.0), Some(&json!(101))));
        assert!(!evaluate_rule(&Rule::MaxValue(100.0), Some(&json!("5"))));
    }

    #[test]
    fn one_of_matches_exact_values() {
        let rule = Rule::OneOf(vec![json!("draft"), json!("published")]);
        assert!(evaluate_rule(&rule, Some(&json!("draft"))));
        assert!(!evaluate_rule(&rule, Some(&json!("archived"))));
        assert!(!evaluate_rule(&rule, None));
    }

    #[test]
    fn type_without_rules_is_valid() {
        let registry = Registry::new();
        let candidate = data(json!({"anything": null}));
        assert!(validate(&registry, &candidate, &COURSE));
    }

    #[test]
    fn course_scenario() {
        let registry = course_registry();
        let evaluator = Evaluator::new(&registry);

        assert!(evaluator.validate(&data(json!({"title": "Go", "price": 10})), &COURSE));
        assert!(!evaluator.validate(&data(json!({"title": "Go", "price": -1})), &COURSE));
        assert!(!evaluator.validate(&data(json!({"title": "", "price": 10})), &COURSE));
    }

    #[test]
    fn missing_field_fails_its_rules() {
        let registry = course_registry();
        let report = Evaluator::new(&registry).check(&data(json!({"title": "Go"})), &COURSE);

        assert!(!report.is_valid());
        let rules: Vec<&Rule> = report.violations_for("price").map(|v| &v.rule).collect();
        assert_eq!(rules, vec![&Rule::Required, &Rule::Positive]);
        assert!(report.violations[0].value.is_none());
    }

    #[test]
    fn every_rule_is_evaluated_after_a_failure() {
        let registry = course_registry();
        let report = Evaluator::new(&registry).check(&data(json!({"title": "", "price": 0})), &COURSE);

        assert_eq!(report.checked, 3);
        assert_eq!(report.violations.len(), 3);
        assert_eq!(report.violations[0].field, "title");
        assert_eq!(report.violations[0].message, "title is required");
    }

    #[test]
    fn validation_is_repeatable() {
        let registry = course_registry();
        let evaluator = Evaluator::new(&registry);
        let candidate = data(json!({"title": "Go", "price": -1}));

        let first = evaluator.check(&candidate, &COURSE);
        let second = evaluator.check(&candidate, &COURSE);
        assert_eq!(first, second);
        assert_eq!(candidate, data(json!({"title": "Go", "price": -1})));
        assert_eq!(registry.rules_for(&COURSE, "price").len(), 2);
    }

    #[test]
    fn dynamic_record_uses_its_own_type_key() {
        let registry = course_registry();
        let evaluator = Evaluator::new(&registry);

        let course = Record::from_value("Course", json!({"title": "", "price": 10})).unwrap();
        let other = Record::from_value("Unknown", json!({"title": ""})).unwrap();

        assert!(!evaluator.check_dynamic(&course).is_valid());
        assert!(evaluator.check_dynamic(&other).is_valid());
    }
}
