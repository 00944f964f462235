//! Prerequisite evaluation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the prerequisite evaluator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Maximum nesting of ALL/ANY composites. Default: 32.
    pub max_expression_depth: Option<usize>,
    /// Log unparseable legacy prerequisite clauses. Default: true.
    pub legacy_diagnostics: Option<bool>,
}

impl EvaluationConfig {
    pub fn effective_max_expression_depth(&self) -> usize {
        self.max_expression_depth.unwrap_or(32)
    }

    pub fn effective_legacy_diagnostics(&self) -> bool {
        self.legacy_diagnostics.unwrap_or(true)
    }
}
