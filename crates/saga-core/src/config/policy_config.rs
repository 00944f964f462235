//! Enforcement policy configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PolicyConfig {
    /// Maximum cached enforcement decisions. Default: 256.
    pub decision_cache_capacity: Option<u64>,
}

impl PolicyConfig {
    pub fn effective_decision_cache_capacity(&self) -> u64 {
        self.decision_cache_capacity.unwrap_or(256)
    }
}
