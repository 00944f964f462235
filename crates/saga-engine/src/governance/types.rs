//! Governance modes, actors, and audit records.

use std::fmt;

use chrono::{DateTime, Utc};
use saga_core::types::CharacterId;
use serde::{Deserialize, Serialize};

/// Table-level enforcement switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GovernanceMode {
    #[default]
    Normal,
    /// GM has waived prerequisite enforcement for this character.
    Override,
    /// Player builds freely; violations are tracked but allowed.
    FreeBuild,
}

impl GovernanceMode {
    pub fn all() -> &'static [GovernanceMode] {
        &[Self::Normal, Self::Override, Self::FreeBuild]
    }

    /// Whether `self → next` is a legal transition. Every non-normal mode
    /// must pass back through `Normal`.
    pub fn can_transition_to(&self, next: GovernanceMode) -> bool {
        matches!(
            (self, next),
            (Self::Normal, Self::Override)
                | (Self::Normal, Self::FreeBuild)
                | (Self::Override, Self::Normal)
                | (Self::FreeBuild, Self::Normal)
        )
    }
}

impl fmt::Display for GovernanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Override => write!(f, "override"),
            Self::FreeBuild => write!(f, "freeBuild"),
        }
    }
}

/// How a non-normal mode is surfaced to players. Never affects enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum VisibilityMode {
    #[default]
    Banner,
    VisualTheme,
    Hidden,
}

/// Current governance state of one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceState {
    pub mode: GovernanceMode,
    pub visibility: VisibilityMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_at: Option<DateTime<Utc>>,
}

impl GovernanceState {
    /// A state in `mode` with no audit metadata. Mostly useful in tests and
    /// for advisory checks that never touch the store.
    pub fn with_mode(mode: GovernanceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Player,
    GameMaster,
    Admin,
}

impl Role {
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::GameMaster | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::GameMaster => write!(f, "gameMaster"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Whoever is requesting a governance change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }
}

/// One audited mode transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    pub character_id: CharacterId,
    pub old_mode: GovernanceMode,
    pub new_mode: GovernanceMode,
    pub reason: String,
    pub approved_by: String,
    pub timestamp: DateTime<Utc>,
}
