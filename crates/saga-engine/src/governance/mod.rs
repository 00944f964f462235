//! Governance — per-character enforcement mode with an audit trail.

pub mod machine;
pub mod store;
pub mod types;

pub use machine::GovernanceStateMachine;
pub use store::{GovernanceStore, InMemoryGovernanceStore};
pub use types::{Actor, GovernanceMode, GovernanceState, Role, TransitionRecord, VisibilityMode};
