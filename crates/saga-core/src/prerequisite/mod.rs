//! Declarative prerequisite expressions.
//!
//! A prerequisite is either a structured [`Expression`] tree or a legacy
//! free-text string. Legacy strings are only ever parsed into an `Expression`
//! at the evaluator boundary; nothing downstream sees the text.

mod expression;

pub use expression::{Condition, DarkSideThreshold, Expression, Prerequisite};
