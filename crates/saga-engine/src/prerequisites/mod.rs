//! Prerequisite evaluation.
//!
//! - `evaluator` — walks an `Expression` against a snapshot
//! - `legacy` — parses free-text prerequisites into an `Expression`
//! - `types` — evaluation result

pub mod evaluator;
pub mod legacy;
pub mod types;

pub use evaluator::PrerequisiteEvaluator;
pub use legacy::{parse_legacy, LegacyParse};
pub use types::EvaluationResult;
