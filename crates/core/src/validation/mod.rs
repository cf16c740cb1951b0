//! Declarative field validation.
//!
//! Rules are declared per type into a [`Registry`](registry::Registry) during
//! setup, then evaluated against candidate records by the
//! [`Evaluator`](evaluator::Evaluator). A failed check is a verdict, never an
//! error.

pub mod candidate;
pub mod evaluator;
pub mod registry;
pub mod rules;
pub mod schema;
