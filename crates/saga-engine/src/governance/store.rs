//! GovernanceStore — persistence seam for governance state and audit log.

use dashmap::DashMap;
use saga_core::errors::GovernanceError;
use saga_core::types::CharacterId;

use super::types::{GovernanceState, TransitionRecord};

/// Storage for per-character governance state.
///
/// `compare_and_set` must be atomic per character: the write lands only if the
/// whole stored state still equals `expected`, so a mode change cannot
/// overwrite a visibility change made since it was read, or the reverse.
pub trait GovernanceStore: Send + Sync {
    /// Current state; characters never seen are in the default `Normal` state.
    fn state(&self, character_id: &CharacterId) -> Result<GovernanceState, GovernanceError>;

    /// Replace the state if the stored state is `expected`. Returns `Ok(false)`
    /// when the precondition failed.
    fn compare_and_set(
        &self,
        character_id: &CharacterId,
        expected: &GovernanceState,
        next: GovernanceState,
    ) -> Result<bool, GovernanceError>;

    fn append_transition(&self, record: TransitionRecord) -> Result<(), GovernanceError>;

    /// Audit log for one character, oldest first.
    fn transitions(
        &self,
        character_id: &CharacterId,
    ) -> Result<Vec<TransitionRecord>, GovernanceError>;
}

/// In-memory store backed by `DashMap`.
#[derive(Debug, Default)]
pub struct InMemoryGovernanceStore {
    states: DashMap<CharacterId, GovernanceState>,
    log: DashMap<CharacterId, Vec<TransitionRecord>>,
}

impl InMemoryGovernanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GovernanceStore for InMemoryGovernanceStore {
    fn state(&self, character_id: &CharacterId) -> Result<GovernanceState, GovernanceError> {
        Ok(self
            .states
            .get(character_id)
            .map(|s| s.value().clone())
            .unwrap_or_default())
    }

    fn compare_and_set(
        &self,
        character_id: &CharacterId,
        expected: &GovernanceState,
        next: GovernanceState,
    ) -> Result<bool, GovernanceError> {
        // The entry guard holds the shard lock for the read-compare-write.
        let mut entry = self.states.entry(character_id.clone()).or_default();
        if *entry != *expected {
            return Ok(false);
        }
        *entry = next;
        Ok(true)
    }

    fn append_transition(&self, record: TransitionRecord) -> Result<(), GovernanceError> {
        self.log
            .entry(record.character_id.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    fn transitions(
        &self,
        character_id: &CharacterId,
    ) -> Result<Vec<TransitionRecord>, GovernanceError> {
        Ok(self
            .log
            .get(character_id)
            .map(|l| l.value().clone())
            .unwrap_or_default())
    }
}
