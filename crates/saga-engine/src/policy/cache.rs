//! Memoized enforcement decisions using moka.

use moka::sync::Cache;
use saga_core::config::PolicyConfig;

use super::engine::EnforcementPolicy;
use super::types::EnforcementDecision;
use crate::governance::GovernanceMode;
use crate::severity::Severity;

type DecisionKey = (GovernanceMode, bool, Severity, usize);

/// `EnforcementPolicy` with a bounded decision cache. Decisions are pure, so
/// entries never need invalidating.
pub struct CachedEnforcementPolicy {
    policy: EnforcementPolicy,
    cache: Cache<DecisionKey, EnforcementDecision>,
}

impl CachedEnforcementPolicy {
    pub fn new(max_entries: u64) -> Self {
        Self {
            policy: EnforcementPolicy::new(),
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(config.effective_decision_cache_capacity())
    }

    pub fn evaluate(
        &self,
        mode: GovernanceMode,
        strict: bool,
        severity: Severity,
        count: usize,
    ) -> EnforcementDecision {
        self.cache.get_with((mode, strict, severity, count), || {
            self.policy.evaluate(mode, strict, severity, count)
        })
    }

    /// Approximate number of cached decisions.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
