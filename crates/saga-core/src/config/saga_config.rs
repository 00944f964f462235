//! Top-level Saga configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    AbilityIncreaseMethod, EvaluationConfig, GovernanceConfig, HouseRulesConfig, PolicyConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Caller overrides (applied via `apply_overrides`)
/// 2. Environment variables (`SAGA_*`)
/// 3. Project config (`saga.toml` in the table root)
/// 4. User config (`~/.saga/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SagaConfig {
    pub house_rules: HouseRulesConfig,
    pub evaluation: EvaluationConfig,
    pub governance: GovernanceConfig,
    pub policy: PolicyConfig,
}

/// Caller-supplied overrides, e.g. a GM toggling strict mode for one session.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub strict_enforcement: Option<bool>,
    pub skill_points_per_level: Option<u32>,
    pub max_expression_depth: Option<usize>,
}

impl SagaConfig {
    /// Load configuration with 4-layer resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("saga.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): caller overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SagaConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &SagaConfig) -> Result<(), ConfigError> {
        if config.house_rules.skill_points_per_level == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "house_rules.skill_points_per_level".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(depth) = config.evaluation.max_expression_depth {
            if !(1..=256).contains(&depth) {
                return Err(ConfigError::ValidationFailed {
                    field: "evaluation.max_expression_depth".to_string(),
                    message: "must be between 1 and 256".to_string(),
                });
            }
        }
        if config.policy.decision_cache_capacity == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "policy.decision_cache_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.saga/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".saga").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored so older binaries accept newer files.
    fn merge_toml_file(config: &mut SagaConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SagaConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut SagaConfig, other: &SagaConfig) {
        if other.house_rules.strict_enforcement.is_some() {
            base.house_rules.strict_enforcement = other.house_rules.strict_enforcement;
        }
        if other.house_rules.skill_points_per_level.is_some() {
            base.house_rules.skill_points_per_level = other.house_rules.skill_points_per_level;
        }
        if other.house_rules.ability_increase_method.is_some() {
            base.house_rules.ability_increase_method = other.house_rules.ability_increase_method;
        }

        if other.evaluation.max_expression_depth.is_some() {
            base.evaluation.max_expression_depth = other.evaluation.max_expression_depth;
        }
        if other.evaluation.legacy_diagnostics.is_some() {
            base.evaluation.legacy_diagnostics = other.evaluation.legacy_diagnostics;
        }

        if other.governance.require_reason.is_some() {
            base.governance.require_reason = other.governance.require_reason;
        }

        if other.policy.decision_cache_capacity.is_some() {
            base.policy.decision_cache_capacity = other.policy.decision_cache_capacity;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SAGA_STRICT_ENFORCEMENT`, `SAGA_SKILL_POINTS_PER_LEVEL`, etc.
    fn apply_env_overrides(config: &mut SagaConfig) {
        if let Ok(val) = std::env::var("SAGA_STRICT_ENFORCEMENT") {
            if let Ok(v) = val.parse::<bool>() {
                config.house_rules.strict_enforcement = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SAGA_SKILL_POINTS_PER_LEVEL") {
            if let Ok(v) = val.parse::<u32>() {
                config.house_rules.skill_points_per_level = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SAGA_ABILITY_INCREASE_METHOD") {
            match val.to_ascii_lowercase().as_str() {
                "standard" => {
                    config.house_rules.ability_increase_method =
                        Some(AbilityIncreaseMethod::Standard)
                }
                "flexible" => {
                    config.house_rules.ability_increase_method =
                        Some(AbilityIncreaseMethod::Flexible)
                }
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("SAGA_MAX_EXPRESSION_DEPTH") {
            if let Ok(v) = val.parse::<usize>() {
                config.evaluation.max_expression_depth = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SAGA_GOVERNANCE_REQUIRE_REASON") {
            if let Ok(v) = val.parse::<bool>() {
                config.governance.require_reason = Some(v);
            }
        }
    }

    /// Apply caller overrides (highest priority).
    fn apply_overrides(config: &mut SagaConfig, o: &ConfigOverrides) {
        if let Some(v) = o.strict_enforcement {
            config.house_rules.strict_enforcement = Some(v);
        }
        if let Some(v) = o.skill_points_per_level {
            config.house_rules.skill_points_per_level = Some(v);
        }
        if let Some(v) = o.max_expression_depth {
            config.evaluation.max_expression_depth = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
