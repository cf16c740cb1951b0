//! Rule registry: `type -> field -> [rule]`.
//!
//! The registry is filled during a setup phase (`&mut Registry`) and only
//! read afterwards; the evaluator borrows it immutably, so the borrow checker
//! keeps registration and validation apart. Wrap it in an `Arc` to share a
//! finished registry across threads.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::candidate::Validated;
use super::rules::Rule;
use crate::types::{FieldName, TypeKey};

/// Rules per field, in declaration order.
pub type FieldRuleMap = IndexMap<FieldName, Vec<Rule>>;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<TypeKey, FieldRuleMap>,
    /// Types registered through [`Registry::register`].
    declared: HashSet<TypeKey>,
    /// Returned by `lookup` for unknown types.
    empty: FieldRuleMap,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rule` to the rules of `field` on `type_key`.
    ///
    /// Existing rules are never replaced; registering the same triple twice
    /// leaves two identical entries, each of which is evaluated.
    pub fn register_rule(
        &mut self,
        type_key: impl Into<TypeKey>,
        field: impl Into<FieldName>,
        rule: Rule,
    ) -> &mut Self {
        let type_key = type_key.into();
        let field = field.into();
        tracing::debug!(type_key = %type_key, field = %field, rule = %rule, "Registered rule");
        self.types
            .entry(type_key)
            .or_default()
            .entry(field)
            .or_default()
            .push(rule);
        self
    }

    /// Scoped builder for the rules of one type.
    pub fn rules_of(&mut self, type_key: impl Into<TypeKey>) -> TypeRules<'_> {
        TypeRules {
            registry: self,
            type_key: type_key.into(),
        }
    }

    /// Let `T` declare its rules.
    ///
    /// Returns `false` without touching the registry when `T` was already
    /// registered, mirroring a type definition that only runs once.
    pub fn register<T: Validated>(&mut self) -> bool {
        let type_key = T::TYPE_KEY;
        if !self.declared.insert(type_key.clone()) {
            tracing::debug!(type_key = %type_key, "Type already registered, skipping");
            return false;
        }
        let mut rules = self.rules_of(type_key);
        T::declare_rules(&mut rules);
        true
    }

    /// All field rules of `type_key`; empty when the type is unknown.
    pub fn lookup(&self, type_key: &TypeKey) -> &FieldRuleMap {
        self.types.get(type_key).unwrap_or(&self.empty)
    }

    /// Rules registered for a single field; empty when nothing is registered.
    pub fn rules_for(&self, type_key: &TypeKey, field: &str) -> &[Rule] {
        self.lookup(type_key)
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Registered type keys, in registration order.
    pub fn type_keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.types.keys()
    }

    /// Number of types with at least one rule.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Handle returned by [`Registry::rules_of`]; every call appends to the same type.
pub struct TypeRules<'r> {
    registry: &'r mut Registry,
    type_key: TypeKey,
}

impl TypeRules<'_> {
    /// Append one rule to `field`.
    pub fn field(&mut self, field: impl Into<FieldName>, rule: Rule) -> &mut Self {
        self.registry
            .register_rule(self.type_key.clone(), field, rule);
        self
    }

    /// Append several rules to `field`, in order.
    pub fn field_all(
        &mut self,
        field: impl Into<FieldName>,
        rules: impl IntoIterator<Item = Rule>,
    ) -> &mut Self {
        let field = field.into();
        for rule in rules {
            self.field(field.clone(), rule);
        }
        self
    }
}
