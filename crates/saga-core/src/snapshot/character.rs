use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{AbilityKind, AbilityScores, OwnedAbility};
use crate::errors::StructureError;
use crate::types::collections::FxHashSet;
use crate::types::{normalize_key, AbilityId, CharacterId};

/// Snapshot layout version understood by this build.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Highest ability score accepted by `validate`.
const MAX_ABILITY_SCORE: u8 = 60;

/// Immutable point-in-time view of a character.
///
/// Fields are private; construct through [`SnapshotBuilder`] or deserialize at
/// the repository boundary and call [`CharacterSnapshot::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSnapshot {
    schema_version: u32,
    character_id: CharacterId,
    #[serde(default)]
    name: String,
    level: u32,
    #[serde(default)]
    base_attack_bonus: i32,
    #[serde(default)]
    abilities: AbilityScores,
    #[serde(default)]
    dark_side_score: u32,
    #[serde(default)]
    species: String,
    #[serde(default)]
    is_droid: bool,
    #[serde(default)]
    droid_systems: BTreeSet<String>,
    #[serde(default)]
    class_levels: BTreeMap<AbilityId, u32>,
    #[serde(default)]
    owned: Vec<OwnedAbility>,
    #[serde(default)]
    trained_skills: BTreeSet<String>,
}

impl CharacterSnapshot {
    pub fn builder(character_id: impl Into<CharacterId>) -> SnapshotBuilder {
        SnapshotBuilder::new(character_id.into())
    }

    /// A builder seeded with every field of this snapshot, for deriving a
    /// successor snapshot without touching this one.
    pub fn to_builder(&self) -> SnapshotBuilder {
        SnapshotBuilder {
            snapshot: self.clone(),
        }
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn character_id(&self) -> &CharacterId {
        &self.character_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn base_attack_bonus(&self) -> i32 {
        self.base_attack_bonus
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn dark_side_score(&self) -> u32 {
        self.dark_side_score
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn is_droid(&self) -> bool {
        self.is_droid
    }

    pub fn droid_systems(&self) -> &BTreeSet<String> {
        &self.droid_systems
    }

    pub fn class_levels(&self) -> &BTreeMap<AbilityId, u32> {
        &self.class_levels
    }

    pub fn class_level(&self, class_id: &AbilityId) -> u32 {
        self.class_levels.get(class_id).copied().unwrap_or(0)
    }

    /// Owned abilities, in acquisition order.
    pub fn owned(&self) -> &[OwnedAbility] {
        &self.owned
    }

    pub fn owned_of_kind(&self, kind: AbilityKind) -> impl Iterator<Item = &OwnedAbility> {
        self.owned.iter().filter(move |a| a.kind == kind)
    }

    pub fn ability(&self, id: &AbilityId) -> Option<&OwnedAbility> {
        self.owned.iter().find(|a| &a.id == id)
    }

    pub fn owns(&self, id: &AbilityId) -> bool {
        self.ability(id).is_some()
    }

    pub fn trained_skills(&self) -> &BTreeSet<String> {
        &self.trained_skills
    }

    /// Case- and punctuation-insensitive skill lookup.
    pub fn is_trained_in(&self, skill: &str) -> bool {
        let wanted = normalize_key(skill);
        self.trained_skills.iter().any(|s| normalize_key(s) == wanted)
    }

    /// Reject snapshots the engine cannot reason about.
    pub fn validate(&self) -> Result<(), StructureError> {
        if self.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(StructureError::UnsupportedSchema {
                found: self.schema_version,
                supported: SNAPSHOT_SCHEMA_VERSION,
            });
        }
        if self.character_id.is_blank() {
            return Err(StructureError::MissingField {
                field: "characterId".to_string(),
            });
        }
        for ability in crate::snapshot::Ability::all() {
            if self.abilities.score(*ability) > MAX_ABILITY_SCORE {
                return Err(StructureError::InvalidValue {
                    field: format!("abilities.{}", ability.to_string().to_lowercase()),
                    message: format!("score must not exceed {MAX_ABILITY_SCORE}"),
                });
            }
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for owned in &self.owned {
            if owned.id.is_blank() {
                return Err(StructureError::MissingField {
                    field: "owned[].id".to_string(),
                });
            }
            if !seen.insert(owned.id.as_str()) {
                return Err(StructureError::DuplicateAbility {
                    id: owned.id.to_string(),
                });
            }
        }

        let class_total: u64 = self.class_levels.values().map(|&l| u64::from(l)).sum();
        if class_total > u64::from(self.level) {
            return Err(StructureError::InvalidValue {
                field: "classLevels".to_string(),
                message: format!(
                    "class levels sum to {class_total} but character level is {}",
                    self.level
                ),
            });
        }
        Ok(())
    }
}

/// Builder for [`CharacterSnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: CharacterSnapshot,
}

impl SnapshotBuilder {
    pub fn new(character_id: CharacterId) -> Self {
        Self {
            snapshot: CharacterSnapshot {
                schema_version: SNAPSHOT_SCHEMA_VERSION,
                character_id,
                name: String::new(),
                level: 0,
                base_attack_bonus: 0,
                abilities: AbilityScores::default(),
                dark_side_score: 0,
                species: String::new(),
                is_droid: false,
                droid_systems: BTreeSet::new(),
                class_levels: BTreeMap::new(),
                owned: Vec::new(),
                trained_skills: BTreeSet::new(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.snapshot.name = name.into();
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.snapshot.level = level;
        self
    }

    pub fn base_attack_bonus(mut self, bab: i32) -> Self {
        self.snapshot.base_attack_bonus = bab;
        self
    }

    pub fn abilities(mut self, abilities: AbilityScores) -> Self {
        self.snapshot.abilities = abilities;
        self
    }

    pub fn dark_side_score(mut self, score: u32) -> Self {
        self.snapshot.dark_side_score = score;
        self
    }

    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.snapshot.species = species.into();
        self
    }

    pub fn droid(mut self, systems: &[&str]) -> Self {
        self.snapshot.is_droid = true;
        self.snapshot
            .droid_systems
            .extend(systems.iter().map(|s| s.to_string()));
        self
    }

    pub fn class_level(mut self, class_id: impl Into<AbilityId>, levels: u32) -> Self {
        self.snapshot.class_levels.insert(class_id.into(), levels);
        self
    }

    pub fn owned(mut self, ability: OwnedAbility) -> Self {
        self.snapshot.owned.push(ability);
        self
    }

    pub fn trained(mut self, skill: impl Into<String>) -> Self {
        self.snapshot.trained_skills.insert(skill.into());
        self
    }

    /// Build without validation. Use `build_validated` at trust boundaries.
    pub fn build(self) -> CharacterSnapshot {
        self.snapshot
    }

    pub fn build_validated(self) -> Result<CharacterSnapshot, StructureError> {
        self.snapshot.validate()?;
        Ok(self.snapshot)
    }
}
