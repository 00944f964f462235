//! Delta — a pure, unapplied description of a character change.

use std::collections::BTreeMap;

use saga_core::errors::StructureError;
use saga_core::snapshot::CharacterSnapshot;
use saga_core::traits::RuleDataSource;
use saga_core::types::AbilityId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FIELD_LEVEL: &str = "level";
pub const FIELD_CLASS_LEVELS: &str = "classLevels";
pub const ADD_FEATS: &str = "feats";
pub const ADD_TALENTS: &str = "talents";
pub const ADD_TRAINED_SKILLS: &str = "trainedSkills";
pub const ADD_CLASSES: &str = "classes";
pub const ADD_PENDING_GRANTS: &str = "pendingGrants";

/// Field assignments plus collection additions, in ordered maps so equal
/// deltas serialize identically. Applying it is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Delta {
    #[serde(default)]
    pub set: BTreeMap<String, Value>,
    #[serde(default)]
    pub add: BTreeMap<String, Vec<String>>,
}

impl Delta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.insert(field.into(), value.into());
        self
    }

    pub fn add(mut self, collection: impl Into<String>, item: impl Into<String>) -> Self {
        self.add.entry(collection.into()).or_default().push(item.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.add.values().all(Vec::is_empty)
    }

    /// Items added to `collection`, empty when none.
    pub fn added(&self, collection: &str) -> &[String] {
        self.add.get(collection).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The snapshot this delta would produce, leaving `snapshot` untouched.
    ///
    /// Content ids are resolved through `rules` so added abilities carry their
    /// prerequisites. `pendingGrants` is host bookkeeping and has no snapshot
    /// counterpart.
    pub fn preview(
        &self,
        snapshot: &CharacterSnapshot,
        rules: &dyn RuleDataSource,
    ) -> Result<CharacterSnapshot, StructureError> {
        let mut builder = snapshot.to_builder();

        for (field, value) in &self.set {
            if field == FIELD_LEVEL {
                builder = builder.level(as_u32(field, value)?);
            } else if let Some(class_id) = field
                .strip_prefix(FIELD_CLASS_LEVELS)
                .and_then(|rest| rest.strip_prefix('.'))
            {
                builder = builder.class_level(class_id, as_u32(field, value)?);
            } else {
                return Err(invalid(field, "unsupported field"));
            }
        }

        for (collection, items) in &self.add {
            for item in items {
                let id = AbilityId::new(item.as_str());
                builder = match collection.as_str() {
                    ADD_FEATS | ADD_TALENTS | ADD_CLASSES if snapshot.owns(&id) => builder,
                    ADD_FEATS => match rules.feat(&id) {
                        Some(def) => builder.owned(def.to_owned_ability()),
                        None => return Err(invalid(collection, &format!("unknown feat {id}"))),
                    },
                    ADD_TALENTS => match rules.talent(&id) {
                        Some(def) => builder.owned(def.to_owned_ability()),
                        None => return Err(invalid(collection, &format!("unknown talent {id}"))),
                    },
                    ADD_CLASSES => match rules.class(&id) {
                        Some(def) => builder.owned(def.to_owned_ability()),
                        None => return Err(invalid(collection, &format!("unknown class {id}"))),
                    },
                    ADD_TRAINED_SKILLS => builder.trained(item.as_str()),
                    ADD_PENDING_GRANTS => builder,
                    _ => return Err(invalid(collection, "unsupported collection")),
                };
            }
        }

        builder.build_validated()
    }
}

fn as_u32(field: &str, value: &Value) -> Result<u32, StructureError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| StructureError::WrongType {
            field: field.to_string(),
            expected: "unsigned integer".to_string(),
        })
}

fn invalid(field: &str, message: &str) -> StructureError {
    StructureError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
