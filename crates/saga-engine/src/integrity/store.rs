//! Keyed store of integrity snapshots.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;
use saga_core::types::CharacterId;

use super::types::IntegritySnapshot;

type Slot = Arc<Mutex<Option<Arc<IntegritySnapshot>>>>;

/// One slot per character. A slot's mutex is held for a whole
/// evaluate-diff-replace sequence, so runs for the same character serialize
/// while different characters proceed independently.
#[derive(Debug, Default)]
pub struct IntegrityStore {
    slots: DashMap<CharacterId, Slot>,
}

impl IntegrityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot for `character_id`, created empty on first use.
    pub(crate) fn slot(&self, character_id: &CharacterId) -> Slot {
        self.slots
            .entry(character_id.clone())
            .or_default()
            .value()
            .clone()
    }

    pub fn get(&self, character_id: &CharacterId) -> Option<Arc<IntegritySnapshot>> {
        let slot = self.slots.get(character_id)?.value().clone();
        let guard = lock(&slot);
        guard.clone()
    }

    pub fn put(&self, snapshot: IntegritySnapshot) {
        let slot = self.slot(&snapshot.character_id);
        *lock(&slot) = Some(Arc::new(snapshot));
    }

    /// Clear the stored snapshot. The slot itself is dropped only when no
    /// in-flight run holds it, so a run that commits after this call stays
    /// visible instead of landing in a detached slot.
    pub fn remove(&self, character_id: &CharacterId) -> Option<Arc<IntegritySnapshot>> {
        let slot = self.slots.get(character_id)?.value().clone();
        let taken = lock(&slot).take();
        drop(slot);
        self.slots
            .remove_if(character_id, |_, s| Arc::strong_count(s) == 1 && lock(s).is_none());
        taken
    }

    /// Number of characters with a slot.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Lock a slot. A panic in another holder cannot leave the slot half-written
/// (the value is swapped in one assignment), so poisoning is ignored.
pub(crate) fn lock(slot: &Slot) -> MutexGuard<'_, Option<Arc<IntegritySnapshot>>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
