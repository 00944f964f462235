//! # saga-core
//!
//! Foundation crate for the Saga legality engine.
//! Defines the character snapshot model, prerequisite expressions, identifiers,
//! errors, configuration, tracing setup, and the collaborator traits the engine
//! consumes. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod prerequisite;
pub mod snapshot;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::SagaConfig;
pub use prerequisite::{Condition, DarkSideThreshold, Expression, Prerequisite};
pub use snapshot::{
    Ability, AbilityKind, AbilityScores, CharacterSnapshot, OwnedAbility, SnapshotBuilder,
};
pub use types::identifiers::{AbilityId, CharacterId};
