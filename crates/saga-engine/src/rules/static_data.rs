//! StaticRuleData — in-memory `RuleDataSource`.

use std::path::Path;

use saga_core::config::{HouseRules, HouseRulesConfig};
use saga_core::errors::RuleDataError;
use saga_core::prerequisite::Prerequisite;
use saga_core::snapshot::AbilityKind;
use saga_core::traits::{AbilityDefinition, ClassDefinition, RuleDataSource};
use saga_core::types::collections::FxHashMap;
use saga_core::types::AbilityId;
use serde::Deserialize;
use tracing::debug;

use super::prestige::prestige_classes;

/// Feats, talents and classes held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct StaticRuleData {
    feats: FxHashMap<AbilityId, AbilityDefinition>,
    talents: FxHashMap<AbilityId, AbilityDefinition>,
    classes: FxHashMap<AbilityId, ClassDefinition>,
    house_rules: HouseRules,
}

/// On-disk rule table layout.
///
/// ```toml
/// [house_rules]
/// skill_points_per_level = 6
///
/// [[feat]]
/// id = "power-attack"
/// name = "Power Attack"
/// prerequisite = "Str 13"
///
/// [[talent]]
/// id = "improved-initiative"
/// name = "Improved Initiative"
/// tree = "Awareness"
///
/// [[class]]
/// id = "soldier"
/// name = "Soldier"
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleTable {
    #[serde(default)]
    house_rules: HouseRulesConfig,
    #[serde(default)]
    include_prestige: bool,
    #[serde(default)]
    feat: Vec<RuleEntry>,
    #[serde(default)]
    talent: Vec<RuleEntry>,
    #[serde(default)]
    class: Vec<ClassEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    id: String,
    name: String,
    #[serde(default)]
    kind: Option<AbilityKind>,
    #[serde(default)]
    tree: Option<String>,
    #[serde(default)]
    prerequisite: Option<Prerequisite>,
    #[serde(default)]
    repeatable: bool,
}

#[derive(Debug, Deserialize)]
struct ClassEntry {
    id: String,
    name: String,
    #[serde(default)]
    prestige: bool,
    #[serde(default)]
    prerequisite: Option<Prerequisite>,
}

impl StaticRuleData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty tables plus the built-in prestige classes.
    pub fn with_prestige_classes() -> Self {
        let mut data = Self::new();
        for class in prestige_classes() {
            data.classes.insert(class.id.clone(), class);
        }
        data
    }

    pub fn with_house_rules(mut self, house_rules: HouseRules) -> Self {
        self.house_rules = house_rules;
        self
    }

    /// Builder form of `insert_feat`; a duplicate id replaces the earlier entry.
    pub fn feat_entry(mut self, definition: AbilityDefinition) -> Self {
        self.feats.insert(definition.id.clone(), definition);
        self
    }

    pub fn talent_entry(mut self, definition: AbilityDefinition) -> Self {
        self.talents.insert(definition.id.clone(), definition);
        self
    }

    pub fn class_entry(mut self, definition: ClassDefinition) -> Self {
        self.classes.insert(definition.id.clone(), definition);
        self
    }

    pub fn insert_feat(&mut self, definition: AbilityDefinition) -> Result<(), RuleDataError> {
        if definition.kind != AbilityKind::Feat {
            return Err(RuleDataError::InvalidEntry {
                id: definition.id.to_string(),
                message: format!("expected a feat, found {}", definition.kind),
            });
        }
        insert_unique(&mut self.feats, "feat", definition)
    }

    pub fn insert_talent(&mut self, definition: AbilityDefinition) -> Result<(), RuleDataError> {
        if definition.kind == AbilityKind::Feat || definition.kind == AbilityKind::Class {
            return Err(RuleDataError::InvalidEntry {
                id: definition.id.to_string(),
                message: format!("expected a talent or force ability, found {}", definition.kind),
            });
        }
        insert_unique(&mut self.talents, "talent", definition)
    }

    pub fn insert_class(&mut self, definition: ClassDefinition) -> Result<(), RuleDataError> {
        if self.classes.contains_key(&definition.id) {
            return Err(RuleDataError::Duplicate {
                kind: "class".to_string(),
                id: definition.id.to_string(),
            });
        }
        self.classes.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Parse a TOML rule table.
    pub fn from_toml_str(text: &str) -> Result<Self, RuleDataError> {
        let table: RuleTable =
            toml::from_str(text).map_err(|e| RuleDataError::Parse(e.to_string()))?;

        let mut data = if table.include_prestige {
            Self::with_prestige_classes()
        } else {
            Self::new()
        };
        data.house_rules = table.house_rules.resolve();

        for entry in table.feat {
            data.insert_feat(entry.into_definition(AbilityKind::Feat)?)?;
        }
        for entry in table.talent {
            data.insert_talent(entry.into_definition(AbilityKind::Talent)?)?;
        }
        for entry in table.class {
            data.insert_class(entry.into_definition()?)?;
        }

        debug!(
            feats = data.feats.len(),
            talents = data.talents.len(),
            classes = data.classes.len(),
            "rule table loaded"
        );
        Ok(data)
    }

    pub fn from_file(path: &Path) -> Result<Self, RuleDataError> {
        let text = std::fs::read_to_string(path).map_err(|_| RuleDataError::Io {
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn feat_count(&self) -> usize {
        self.feats.len()
    }

    pub fn talent_count(&self) -> usize {
        self.talents.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

fn insert_unique(
    table: &mut FxHashMap<AbilityId, AbilityDefinition>,
    kind: &str,
    definition: AbilityDefinition,
) -> Result<(), RuleDataError> {
    if table.contains_key(&definition.id) {
        return Err(RuleDataError::Duplicate {
            kind: kind.to_string(),
            id: definition.id.to_string(),
        });
    }
    table.insert(definition.id.clone(), definition);
    Ok(())
}

fn check_ids(id: &str, name: &str) -> Result<(), RuleDataError> {
    if id.trim().is_empty() {
        return Err(RuleDataError::InvalidEntry {
            id: name.to_string(),
            message: "id must not be blank".to_string(),
        });
    }
    if name.trim().is_empty() {
        return Err(RuleDataError::InvalidEntry {
            id: id.to_string(),
            message: "name must not be blank".to_string(),
        });
    }
    Ok(())
}

impl RuleEntry {
    fn into_definition(self, default_kind: AbilityKind) -> Result<AbilityDefinition, RuleDataError> {
        check_ids(&self.id, &self.name)?;
        let kind = self.kind.unwrap_or(default_kind);
        if kind == AbilityKind::Talent && self.tree.is_none() {
            return Err(RuleDataError::InvalidEntry {
                id: self.id,
                message: "talents must name a tree".to_string(),
            });
        }
        Ok(AbilityDefinition {
            id: AbilityId::new(self.id),
            name: self.name,
            kind,
            tree: self.tree,
            prerequisite: self.prerequisite,
            repeatable: self.repeatable,
        })
    }
}

impl ClassEntry {
    fn into_definition(self) -> Result<ClassDefinition, RuleDataError> {
        check_ids(&self.id, &self.name)?;
        Ok(ClassDefinition {
            id: AbilityId::new(self.id),
            name: self.name,
            prestige: self.prestige,
            prerequisite: self.prerequisite,
        })
    }
}

impl RuleDataSource for StaticRuleData {
    fn feat(&self, id: &AbilityId) -> Option<AbilityDefinition> {
        self.feats.get(id).cloned()
    }

    fn talent(&self, id: &AbilityId) -> Option<AbilityDefinition> {
        self.talents.get(id).cloned()
    }

    fn class(&self, id: &AbilityId) -> Option<ClassDefinition> {
        self.classes.get(id).cloned()
    }

    fn house_rules(&self) -> HouseRules {
        self.house_rules
    }
}
