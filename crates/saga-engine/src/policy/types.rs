//! Policy decision types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::governance::GovernanceMode;
use crate::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionOutcome {
    Allow,
    Warn,
    Block,
}

impl DecisionOutcome {
    /// Whether the action may proceed (possibly with a warning).
    pub fn permits(&self) -> bool {
        !matches!(self, Self::Block)
    }
}

impl fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Warn => write!(f, "warn"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// The policy inputs a decision was made under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySnapshot {
    pub mode: GovernanceMode,
    pub strict: bool,
}

/// The violation summary a decision was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationCounts {
    pub severity: Severity,
    pub count: usize,
}

/// Result of applying the enforcement policy. A `Block` is a value, not an
/// error; callers decide what blocking means for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcementDecision {
    pub outcome: DecisionOutcome,
    pub reason: String,
    pub policy: PolicySnapshot,
    pub summary: ViolationCounts,
}
