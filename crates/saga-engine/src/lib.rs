//! # saga-engine
//!
//! Prerequisite evaluation and enforcement for character progression.
//!
//! Subsystems:
//! - `prerequisites` — condition-tree evaluator and legacy text adapter
//! - `severity` — evaluator result → None/Warning/Error/Structural
//! - `policy` — governance mode + severity → allow/warn/block
//! - `governance` — per-character mode state machine with audit log
//! - `progression` — intent → validated, unapplied delta
//! - `integrity` — whole-character re-evaluation and violation diffs
//! - `rules` — static rule tables, built-in prestige prerequisites
//! - `gate` — advisory check composing evaluator, classifier and policy

pub mod gate;
pub mod governance;
pub mod integrity;
pub mod policy;
pub mod prerequisites;
pub mod progression;
pub mod rules;
pub mod severity;

pub use gate::{ActionGate, GateVerdict};
pub use governance::{
    Actor, GovernanceMode, GovernanceState, GovernanceStateMachine, GovernanceStore,
    InMemoryGovernanceStore, Role, TransitionRecord, VisibilityMode,
};
pub use integrity::{
    IntegrityReport, IntegritySnapshot, IntegrityStore, IntegrityTracker, ViolationDiff,
    ViolationRecord, ViolationSummary,
};
pub use policy::{
    evaluate_policy, CachedEnforcementPolicy, DecisionOutcome, EnforcementDecision,
    EnforcementPolicy,
};
pub use prerequisites::{EvaluationResult, PrerequisiteEvaluator};
pub use progression::{CompiledPlan, Delta, Intent, ProgressionCompiler};
pub use rules::StaticRuleData;
pub use severity::{Severity, SeverityClassifier};
