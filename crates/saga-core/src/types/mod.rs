//! Shared identifier and collection types.

pub mod collections;
pub mod identifiers;
pub mod normalize;

pub use identifiers::{AbilityId, CharacterId};
pub use normalize::normalize_key;
