//! Governance configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Reject mode transitions without a reason. Default: true.
    pub require_reason: Option<bool>,
}

impl GovernanceConfig {
    pub fn effective_require_reason(&self) -> bool {
        self.require_reason.unwrap_or(true)
    }
}
