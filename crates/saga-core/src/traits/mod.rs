//! Collaborator traits the engine consumes.

pub mod character_repository;
pub mod rule_data;

pub use character_repository::{CharacterRepository, InMemoryCharacterRepository};
pub use rule_data::{AbilityDefinition, ClassDefinition, RuleDataSource};
