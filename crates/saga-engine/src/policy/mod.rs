//! Enforcement policy: governance mode + severity → allow / warn / block.

pub mod cache;
pub mod engine;
pub mod types;

pub use cache::CachedEnforcementPolicy;
pub use engine::{evaluate_policy, EnforcementPolicy};
pub use types::{DecisionOutcome, EnforcementDecision, PolicySnapshot, ViolationCounts};
