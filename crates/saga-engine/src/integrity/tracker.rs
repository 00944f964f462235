//! IntegrityTracker — whole-character re-evaluation.

use std::sync::Arc;

use chrono::Utc;
use saga_core::errors::StructureError;
use saga_core::snapshot::CharacterSnapshot;
use saga_core::traits::CharacterRepository;
use saga_core::types::CharacterId;
use tracing::{debug, instrument, warn};

use super::diff::diff_snapshots;
use super::store::{lock, IntegrityStore};
use super::types::{IntegrityReport, IntegritySnapshot, ViolationRecord};
use crate::prerequisites::PrerequisiteEvaluator;
use crate::severity::SeverityClassifier;

/// Re-evaluates owned abilities and tracks violations per character.
///
/// Never fails outward: unusable input yields a `degraded` report and leaves
/// the stored snapshot alone. The tracker never writes to the character.
pub struct IntegrityTracker {
    evaluator: PrerequisiteEvaluator,
    classifier: SeverityClassifier,
    store: Arc<IntegrityStore>,
}

impl IntegrityTracker {
    pub fn new(store: Arc<IntegrityStore>) -> Self {
        Self {
            evaluator: PrerequisiteEvaluator::new(),
            classifier: SeverityClassifier::new(),
            store,
        }
    }

    pub fn with_evaluator(mut self, evaluator: PrerequisiteEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn store(&self) -> &Arc<IntegrityStore> {
        &self.store
    }

    /// Evaluate every owned ability and replace the stored snapshot.
    #[instrument(skip(self, snapshot), fields(character = %character_id))]
    pub fn reevaluate(
        &self,
        character_id: &CharacterId,
        snapshot: &CharacterSnapshot,
    ) -> IntegrityReport {
        let evaluated_at = Utc::now();

        if let Err(e) = snapshot.validate() {
            warn!(error = %e, "snapshot failed validation; integrity run degraded");
            return IntegrityReport::degraded(character_id.clone(), evaluated_at);
        }
        if snapshot.character_id() != character_id {
            warn!(
                snapshot_id = %snapshot.character_id(),
                "snapshot belongs to another character; integrity run degraded"
            );
            return IntegrityReport::degraded(character_id.clone(), evaluated_at);
        }

        let slot = self.store.slot(character_id);
        let mut guard = lock(&slot);

        let records = self.collect_violations(snapshot);
        let current = IntegritySnapshot::new(character_id.clone(), evaluated_at, records);
        let diff = diff_snapshots(guard.as_deref(), &current);
        let overall = self
            .classifier
            .classify_all(current.violations.values().map(|r| r.severity));

        debug!(
            violations = current.summary.total,
            new = diff.new.len(),
            resolved = diff.resolved.len(),
            changed = diff.changed.len(),
            %overall,
            "integrity re-evaluated"
        );

        let report = IntegrityReport {
            character_id: character_id.clone(),
            violations: current.violations.values().cloned().collect(),
            diff,
            summary: current.summary.clone(),
            overall,
            evaluated_at,
            degraded: false,
        };
        *guard = Some(Arc::new(current));
        report
    }

    /// Load the character through `repository`, then re-evaluate.
    #[instrument(skip(self, repository), fields(character = %character_id))]
    pub fn reevaluate_from(
        &self,
        repository: &dyn CharacterRepository,
        character_id: &CharacterId,
    ) -> IntegrityReport {
        match repository.snapshot(character_id) {
            Ok(snapshot) => self.reevaluate(character_id, &snapshot),
            Err(e) => {
                warn!(error = %e, "character could not be loaded; integrity run degraded");
                IntegrityReport::degraded(character_id.clone(), Utc::now())
            }
        }
    }

    /// Seed the store from a persisted snapshot, e.g. after import.
    pub fn restore(
        &self,
        character_id: &CharacterId,
        snapshot: IntegritySnapshot,
    ) -> Result<(), StructureError> {
        if &snapshot.character_id != character_id {
            return Err(StructureError::InvalidValue {
                field: "characterId".to_string(),
                message: format!(
                    "integrity snapshot for {} cannot be restored onto {character_id}",
                    snapshot.character_id
                ),
            });
        }
        self.store.put(snapshot);
        Ok(())
    }

    pub fn current(&self, character_id: &CharacterId) -> Option<Arc<IntegritySnapshot>> {
        self.store.get(character_id)
    }

    pub fn forget(&self, character_id: &CharacterId) -> Option<Arc<IntegritySnapshot>> {
        self.store.remove(character_id)
    }

    fn collect_violations(&self, snapshot: &CharacterSnapshot) -> Vec<ViolationRecord> {
        let mut records = Vec::new();
        for owned in snapshot.owned() {
            let Some(prerequisite) = owned.prerequisite.as_ref() else {
                continue;
            };
            let result =
                match self
                    .evaluator
                    .evaluate_prerequisite(snapshot, prerequisite, Some(&owned.id))
                {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(ability = %owned.id, error = %e, "prerequisite evaluation failed; ability omitted");
                        continue;
                    }
                };
            if result.satisfied {
                continue;
            }
            let severity = self.classifier.classify_for(owned.kind, &result);
            records.push(ViolationRecord {
                ability_id: owned.id.clone(),
                ability_name: owned.name.clone(),
                ability_kind: owned.kind,
                missing_conditions: result.unmet,
                permanently_blocked: result.permanently_blocked,
                severity,
            });
        }
        records
    }
}
