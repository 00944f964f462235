//! Progression intents and their JSON boundary.

use saga_core::errors::{CompileError, StructureError};
use saga_core::types::AbilityId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A requested progression step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    ChooseTalent {
        #[serde(rename = "talentId")]
        talent_id: AbilityId,
    },
    ChooseFeat {
        #[serde(rename = "featId")]
        feat_id: AbilityId,
    },
    ChooseSkill {
        #[serde(rename = "skillId")]
        skill_id: String,
    },
    LevelUp {
        #[serde(rename = "classId")]
        class_id: AbilityId,
    },
}

impl Intent {
    pub fn choose_talent(id: impl Into<AbilityId>) -> Self {
        Self::ChooseTalent {
            talent_id: id.into(),
        }
    }

    pub fn choose_feat(id: impl Into<AbilityId>) -> Self {
        Self::ChooseFeat { feat_id: id.into() }
    }

    pub fn choose_skill(skill: impl Into<String>) -> Self {
        Self::ChooseSkill {
            skill_id: skill.into(),
        }
    }

    pub fn level_up(class_id: impl Into<AbilityId>) -> Self {
        Self::LevelUp {
            class_id: class_id.into(),
        }
    }

    /// The intent's discriminator as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChooseTalent { .. } => "chooseTalent",
            Self::ChooseFeat { .. } => "chooseFeat",
            Self::ChooseSkill { .. } => "chooseSkill",
            Self::LevelUp { .. } => "levelUp",
        }
    }

    /// Parse `{type, <idField>}`.
    ///
    /// A missing or non-string field is a `StructureError`; an unrecognized
    /// `type` is `UnknownIntent`.
    pub fn from_json(value: &Value) -> Result<Self, CompileError> {
        let object = value.as_object().ok_or_else(|| StructureError::WrongType {
            field: "intent".to_string(),
            expected: "object".to_string(),
        })?;
        let kind = string_field(object, "type")?;
        let intent = match kind {
            "chooseTalent" => Self::choose_talent(id_field(object, "talentId")?),
            "chooseFeat" => Self::choose_feat(id_field(object, "featId")?),
            "chooseSkill" => Self::choose_skill(id_field(object, "skillId")?),
            "levelUp" => Self::level_up(id_field(object, "classId")?),
            other => {
                return Err(CompileError::UnknownIntent {
                    kind: other.to_string(),
                })
            }
        };
        Ok(intent)
    }
}

fn string_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Result<&'a str, StructureError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(StructureError::MissingField {
            field: field.to_string(),
        }),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(StructureError::WrongType {
            field: field.to_string(),
            expected: "string".to_string(),
        }),
    }
}

/// Like `string_field`, but blank ids count as missing.
fn id_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Result<&'a str, StructureError> {
    let value = string_field(object, field)?.trim();
    if value.is_empty() {
        return Err(StructureError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(value)
}
