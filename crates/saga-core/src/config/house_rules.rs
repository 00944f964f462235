//! Table house rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the four-level ability increase is distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AbilityIncreaseMethod {
    /// +1 to two different abilities.
    #[default]
    Standard,
    /// Two points split freely, including +2 to one ability.
    Flexible,
}

impl fmt::Display for AbilityIncreaseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Flexible => write!(f, "flexible"),
        }
    }
}

/// House-rule section as written in `saga.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HouseRulesConfig {
    /// Block warning-level violations instead of warning. Default: false.
    pub strict_enforcement: Option<bool>,
    /// Trained skills granted per character level. Default: 4.
    pub skill_points_per_level: Option<u32>,
    /// Ability increase distribution. Default: standard.
    pub ability_increase_method: Option<AbilityIncreaseMethod>,
}

impl HouseRulesConfig {
    pub fn effective_strict_enforcement(&self) -> bool {
        self.strict_enforcement.unwrap_or(false)
    }

    pub fn effective_skill_points_per_level(&self) -> u32 {
        self.skill_points_per_level.unwrap_or(4)
    }

    pub fn effective_ability_increase_method(&self) -> AbilityIncreaseMethod {
        self.ability_increase_method.unwrap_or_default()
    }

    /// Resolve every optional field to its effective value.
    pub fn resolve(&self) -> HouseRules {
        HouseRules {
            strict_enforcement: self.effective_strict_enforcement(),
            skill_points_per_level: self.effective_skill_points_per_level(),
            ability_increase_method: self.effective_ability_increase_method(),
        }
    }
}

/// Resolved house rules handed to the engine by a `RuleDataSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRules {
    pub strict_enforcement: bool,
    pub skill_points_per_level: u32,
    pub ability_increase_method: AbilityIncreaseMethod,
}

impl Default for HouseRules {
    fn default() -> Self {
        HouseRulesConfig::default().resolve()
    }
}
