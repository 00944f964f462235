use serde::{Deserialize, Serialize};

use crate::snapshot::Ability;

/// Dark Side Score threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DarkSideThreshold {
    AtLeast(u32),
    /// Labelled "equal to Wisdom" in the rules text; satisfied when the
    /// score is at least the current Wisdom score.
    EqualsWisdom,
}

/// A single leaf requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Feat { name: String },
    Talent { name: String },
    /// At least `count` talents drawn from any of `trees`.
    TalentsFromTree { trees: Vec<String>, count: u32 },
    Attribute { ability: Ability, min: u8 },
    TrainedSkill { skill: String },
    BaseAttackBonus { min: i32 },
    Level { min: u32 },
    DarkSideScore { threshold: DarkSideThreshold },
    Species { allowed: Vec<String> },
    DroidSystems { systems: Vec<String> },
}

/// A prerequisite expression tree. Owned children make cycles unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Expression {
    All { items: Vec<Expression> },
    Any { items: Vec<Expression> },
    Condition { condition: Condition },
}

impl Expression {
    pub fn all(items: Vec<Expression>) -> Self {
        Self::All { items }
    }

    pub fn any(items: Vec<Expression>) -> Self {
        Self::Any { items }
    }

    pub fn cond(condition: Condition) -> Self {
        Self::Condition { condition }
    }

    pub fn feat(name: impl Into<String>) -> Self {
        Self::cond(Condition::Feat { name: name.into() })
    }

    pub fn talent(name: impl Into<String>) -> Self {
        Self::cond(Condition::Talent { name: name.into() })
    }

    pub fn talents_from(trees: &[&str], count: u32) -> Self {
        Self::cond(Condition::TalentsFromTree {
            trees: trees.iter().map(|t| t.to_string()).collect(),
            count,
        })
    }

    pub fn attribute(ability: Ability, min: u8) -> Self {
        Self::cond(Condition::Attribute { ability, min })
    }

    pub fn trained(skill: impl Into<String>) -> Self {
        Self::cond(Condition::TrainedSkill { skill: skill.into() })
    }

    pub fn bab(min: i32) -> Self {
        Self::cond(Condition::BaseAttackBonus { min })
    }

    pub fn level(min: u32) -> Self {
        Self::cond(Condition::Level { min })
    }

    pub fn dark_side(threshold: DarkSideThreshold) -> Self {
        Self::cond(Condition::DarkSideScore { threshold })
    }

    pub fn species(allowed: &[&str]) -> Self {
        Self::cond(Condition::Species {
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn droid_systems(systems: &[&str]) -> Self {
        Self::cond(Condition::DroidSystems {
            systems: systems.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Nesting depth; a bare condition has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Condition { .. } => 1,
            Self::All { items } | Self::Any { items } => {
                1 + items.iter().map(Expression::depth).max().unwrap_or(0)
            }
        }
    }

    /// Number of leaf conditions in the tree.
    pub fn condition_count(&self) -> usize {
        match self {
            Self::Condition { .. } => 1,
            Self::All { items } | Self::Any { items } => {
                items.iter().map(Expression::condition_count).sum()
            }
        }
    }
}

impl From<Condition> for Expression {
    fn from(condition: Condition) -> Self {
        Self::cond(condition)
    }
}

/// Prerequisite as attached to an ability: structured, or legacy free text.
///
/// Deserializes untagged: a JSON/TOML string becomes `Legacy`, a table becomes
/// `Structured`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prerequisite {
    Legacy(String),
    Structured(Expression),
}

impl From<Expression> for Prerequisite {
    fn from(expr: Expression) -> Self {
        Self::Structured(expr)
    }
}
