//! Configuration system for Saga.
//! TOML-based, 4-layer resolution: overrides > env > project > user > defaults.

pub mod evaluation_config;
pub mod governance_config;
pub mod house_rules;
pub mod policy_config;
pub mod saga_config;

pub use evaluation_config::EvaluationConfig;
pub use governance_config::GovernanceConfig;
pub use house_rules::{AbilityIncreaseMethod, HouseRules, HouseRulesConfig};
pub use policy_config::PolicyConfig;
pub use saga_config::{ConfigOverrides, SagaConfig};
