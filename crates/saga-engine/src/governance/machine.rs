//! GovernanceStateMachine — authorized, audited mode transitions.

use std::sync::Arc;

use chrono::Utc;
use saga_core::config::GovernanceConfig;
use saga_core::errors::GovernanceError;
use saga_core::types::CharacterId;
use tracing::{info, instrument, warn};

use super::store::GovernanceStore;
use super::types::{Actor, GovernanceMode, GovernanceState, TransitionRecord, VisibilityMode};

/// Applies governance changes through an injected store.
pub struct GovernanceStateMachine {
    store: Arc<dyn GovernanceStore>,
    require_reason: bool,
}

impl GovernanceStateMachine {
    pub fn new(store: Arc<dyn GovernanceStore>) -> Self {
        Self {
            store,
            require_reason: true,
        }
    }

    pub fn from_config(store: Arc<dyn GovernanceStore>, config: &GovernanceConfig) -> Self {
        Self {
            store,
            require_reason: config.effective_require_reason(),
        }
    }

    pub fn state(&self, character_id: &CharacterId) -> Result<GovernanceState, GovernanceError> {
        self.store.state(character_id)
    }

    pub fn history(
        &self,
        character_id: &CharacterId,
    ) -> Result<Vec<TransitionRecord>, GovernanceError> {
        self.store.transitions(character_id)
    }

    /// Move a character to `next`.
    ///
    /// Fails closed: on any error the stored state is unchanged and no audit
    /// record is written.
    #[instrument(skip(self, actor, reason), fields(actor = %actor.id, to = %next))]
    pub fn transition(
        &self,
        character_id: &CharacterId,
        next: GovernanceMode,
        actor: &Actor,
        reason: &str,
    ) -> Result<GovernanceState, GovernanceError> {
        authorize(actor)?;
        let reason = reason.trim();
        if self.require_reason && reason.is_empty() {
            return Err(GovernanceError::MissingReason);
        }

        let current = self.store.state(character_id)?;
        if !current.mode.can_transition_to(next) {
            return Err(GovernanceError::IllegalTransition {
                from: current.mode.to_string(),
                to: next.to_string(),
            });
        }

        let now = Utc::now();
        let updated = GovernanceState {
            mode: next,
            visibility: current.visibility,
            approved_by: Some(actor.id.clone()),
            reason: (!reason.is_empty()).then(|| reason.to_string()),
            changed_at: Some(now),
        };
        if !self
            .store
            .compare_and_set(character_id, &current, updated.clone())?
        {
            warn!(character = %character_id, "governance transition lost a concurrent write");
            return Err(GovernanceError::Conflict {
                character_id: character_id.to_string(),
            });
        }

        self.store.append_transition(TransitionRecord {
            character_id: character_id.clone(),
            old_mode: current.mode,
            new_mode: next,
            reason: reason.to_string(),
            approved_by: actor.id.clone(),
            timestamp: now,
        })?;

        info!(
            character = %character_id,
            from = %current.mode,
            to = %next,
            approved_by = %actor.id,
            "governance mode changed"
        );
        Ok(updated)
    }

    /// Change how the current mode is displayed. Leaves the mode alone.
    #[instrument(skip(self, actor), fields(actor = %actor.id))]
    pub fn set_visibility(
        &self,
        character_id: &CharacterId,
        visibility: VisibilityMode,
        actor: &Actor,
    ) -> Result<GovernanceState, GovernanceError> {
        authorize(actor)?;
        let current = self.store.state(character_id)?;
        let updated = GovernanceState {
            visibility,
            ..current.clone()
        };
        if !self
            .store
            .compare_and_set(character_id, &current, updated.clone())?
        {
            return Err(GovernanceError::Conflict {
                character_id: character_id.to_string(),
            });
        }
        info!(character = %character_id, ?visibility, "governance visibility changed");
        Ok(updated)
    }
}

fn authorize(actor: &Actor) -> Result<(), GovernanceError> {
    if actor.role.is_privileged() {
        Ok(())
    } else {
        Err(GovernanceError::Unauthorized {
            actor: actor.id.clone(),
            role: actor.role.to_string(),
        })
    }
}
