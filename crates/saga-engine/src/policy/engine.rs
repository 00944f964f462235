//! Policy engine — the mode × strict × severity decision table.

use saga_core::config::HouseRules;

use super::types::{DecisionOutcome, EnforcementDecision, PolicySnapshot, ViolationCounts};
use crate::governance::GovernanceMode;
use crate::severity::Severity;

/// Stateless enforcement policy. Sees only modes and counts, never
/// characters or items.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnforcementPolicy;

impl EnforcementPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(
        &self,
        mode: GovernanceMode,
        strict: bool,
        severity: Severity,
        count: usize,
    ) -> EnforcementDecision {
        let (outcome, reason) = match (mode, severity) {
            (GovernanceMode::Override, _) => (
                DecisionOutcome::Allow,
                format!("GM Override active: {count} violation(s) allowed."),
            ),
            (GovernanceMode::FreeBuild, _) => (
                DecisionOutcome::Allow,
                format!("Free Build mode: {count} violation(s) allowed."),
            ),
            (GovernanceMode::Normal, Severity::None) => (
                DecisionOutcome::Allow,
                "No prerequisite violations.".to_string(),
            ),
            (GovernanceMode::Normal, Severity::Warning) if strict => (
                DecisionOutcome::Block,
                format!("Strict enforcement: {count} violation(s) must be resolved."),
            ),
            (GovernanceMode::Normal, Severity::Warning) => (
                DecisionOutcome::Warn,
                format!("{count} violation(s) detected; proceeding with warning."),
            ),
            (GovernanceMode::Normal, Severity::Error) => (
                DecisionOutcome::Block,
                format!("{count} violation(s) must be resolved before continuing."),
            ),
            (GovernanceMode::Normal, Severity::Structural) => (
                DecisionOutcome::Block,
                format!(
                    "{count} violation(s) include a structural incompatibility that cannot be resolved."
                ),
            ),
        };

        EnforcementDecision {
            outcome,
            reason,
            policy: PolicySnapshot { mode, strict },
            summary: ViolationCounts { severity, count },
        }
    }
}

/// Apply the policy using the table's house rules for strictness.
pub fn evaluate_policy(
    mode: GovernanceMode,
    house_rules: &HouseRules,
    severity: Severity,
    count: usize,
) -> EnforcementDecision {
    EnforcementPolicy::new().evaluate(mode, house_rules.strict_enforcement, severity, count)
}
