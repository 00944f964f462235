use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prerequisite::Prerequisite;
use crate::types::AbilityId;

/// Kinds of ability a character can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbilityKind {
    Feat,
    Talent,
    Class,
    ForcePower,
    ForceTechnique,
    ForceSecret,
}

impl AbilityKind {
    pub fn all() -> &'static [AbilityKind] {
        &[
            Self::Feat,
            Self::Talent,
            Self::Class,
            Self::ForcePower,
            Self::ForceTechnique,
            Self::ForceSecret,
        ]
    }
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Feat => "feat",
            Self::Talent => "talent",
            Self::Class => "class",
            Self::ForcePower => "forcePower",
            Self::ForceTechnique => "forceTechnique",
            Self::ForceSecret => "forceSecret",
        };
        f.write_str(name)
    }
}

/// An ability the character owns, with its own prerequisite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedAbility {
    pub id: AbilityId,
    pub name: String,
    pub kind: AbilityKind,
    /// Talent tree, for talents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<Prerequisite>,
}

impl OwnedAbility {
    pub fn new(id: impl Into<AbilityId>, name: impl Into<String>, kind: AbilityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            tree: None,
            prerequisite: None,
        }
    }

    pub fn feat(id: &str, name: &str) -> Self {
        Self::new(id, name, AbilityKind::Feat)
    }

    pub fn talent(id: &str, name: &str, tree: &str) -> Self {
        Self::new(id, name, AbilityKind::Talent).in_tree(tree)
    }

    pub fn in_tree(mut self, tree: &str) -> Self {
        self.tree = Some(tree.to_string());
        self
    }

    pub fn requires(mut self, prerequisite: impl Into<Prerequisite>) -> Self {
        self.prerequisite = Some(prerequisite.into());
        self
    }

    pub fn requires_text(mut self, text: &str) -> Self {
        self.prerequisite = Some(Prerequisite::Legacy(text.to_string()));
        self
    }
}
