//! CharacterRepository — supplies snapshots by character id.

use std::sync::RwLock;

use crate::errors::RepositoryError;
use crate::snapshot::CharacterSnapshot;
use crate::types::collections::FxHashMap;
use crate::types::CharacterId;

/// Read-only source of character snapshots.
///
/// Implementations build a fresh snapshot per call; the engine never holds a
/// live document.
pub trait CharacterRepository: Send + Sync {
    fn snapshot(&self, id: &CharacterId) -> Result<CharacterSnapshot, RepositoryError>;
}

/// Map-backed repository for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct InMemoryCharacterRepository {
    characters: RwLock<FxHashMap<CharacterId, CharacterSnapshot>>,
}

impl InMemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a character. Rejects malformed snapshots.
    pub fn put(&self, snapshot: CharacterSnapshot) -> Result<(), RepositoryError> {
        snapshot.validate()?;
        let mut guard = self
            .characters
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;
        guard.insert(snapshot.character_id().clone(), snapshot);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.characters.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CharacterRepository for InMemoryCharacterRepository {
    fn snapshot(&self, id: &CharacterId) -> Result<CharacterSnapshot, RepositoryError> {
        let guard = self
            .characters
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}
