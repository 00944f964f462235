//! Severity levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How broken a prerequisite violation is. Declaration order is the total
/// order: `None < Warning < Error < Structural`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    None,
    Warning,
    Error,
    /// Unfixable by acquiring more prerequisites.
    Structural,
}

impl Severity {
    pub fn all() -> &'static [Severity] {
        &[Self::None, Self::Warning, Self::Error, Self::Structural]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Structural => write!(f, "structural"),
        }
    }
}
