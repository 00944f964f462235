//! Immutable character snapshot model.
//!
//! A `CharacterSnapshot` is built once at the repository boundary for a single
//! evaluation and never mutated afterwards. Derived computations take a
//! snapshot by reference and return new data.

mod abilities;
mod character;
mod owned;

pub use abilities::{Ability, AbilityScores};
pub use character::{CharacterSnapshot, SnapshotBuilder, SNAPSHOT_SCHEMA_VERSION};
pub use owned::{AbilityKind, OwnedAbility};
