//! RuleDataSource — static rule content and house rules.

use serde::{Deserialize, Serialize};

use crate::config::HouseRules;
use crate::prerequisite::Prerequisite;
use crate::snapshot::{AbilityKind, OwnedAbility};
use crate::types::AbilityId;

/// Definition of a feat, talent, or force ability as published in rule data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    pub kind: AbilityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<Prerequisite>,
    /// May be taken more than once (e.g. Skill Focus on different skills).
    #[serde(default)]
    pub repeatable: bool,
}

impl AbilityDefinition {
    /// The owned form of this definition, as added to a character.
    pub fn to_owned_ability(&self) -> OwnedAbility {
        OwnedAbility {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            tree: self.tree.clone(),
            prerequisite: self.prerequisite.clone(),
        }
    }
}

/// Definition of a base or prestige class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: AbilityId,
    pub name: String,
    #[serde(default)]
    pub prestige: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<Prerequisite>,
}

impl ClassDefinition {
    pub fn to_owned_ability(&self) -> OwnedAbility {
        OwnedAbility {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: AbilityKind::Class,
            tree: None,
            prerequisite: self.prerequisite.clone(),
        }
    }
}

/// Static prerequisite tables plus the table's house rules.
pub trait RuleDataSource: Send + Sync {
    fn feat(&self, id: &AbilityId) -> Option<AbilityDefinition>;
    fn talent(&self, id: &AbilityId) -> Option<AbilityDefinition>;
    fn class(&self, id: &AbilityId) -> Option<ClassDefinition>;
    fn house_rules(&self) -> HouseRules;
}
