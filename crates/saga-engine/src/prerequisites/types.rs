//! Evaluation result type.

use serde::{Deserialize, Serialize};

/// Outcome of evaluating one prerequisite against one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub satisfied: bool,
    /// Human-readable unmet conditions, in expression order, de-duplicated.
    pub unmet: Vec<String>,
    /// Set when some unmet condition cannot be fixed by acquiring more
    /// prerequisites (species, droid chassis).
    pub permanently_blocked: bool,
    /// Legacy clauses that could not be parsed and were treated as met.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

impl EvaluationResult {
    /// A result with nothing unmet.
    pub fn satisfied() -> Self {
        Self {
            satisfied: true,
            ..Default::default()
        }
    }

    pub fn unsatisfied(unmet: Vec<String>, permanently_blocked: bool) -> Self {
        Self {
            satisfied: false,
            unmet,
            permanently_blocked,
            diagnostics: Vec::new(),
        }
    }

    pub fn unmet_count(&self) -> usize {
        self.unmet.len()
    }
}
