//! Integrity types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use saga_core::snapshot::AbilityKind;
use saga_core::types::{AbilityId, CharacterId};
use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// One owned ability whose prerequisites are no longer met. Absence of a
/// record means the ability is legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    pub ability_id: AbilityId,
    pub ability_name: String,
    pub ability_kind: AbilityKind,
    pub missing_conditions: Vec<String>,
    pub permanently_blocked: bool,
    pub severity: Severity,
}

/// Violation counts by severity and by ability kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViolationSummary {
    pub total: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_kind: BTreeMap<AbilityKind, usize>,
}

impl ViolationSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ViolationRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total += 1;
            *summary.by_severity.entry(record.severity).or_insert(0) += 1;
            *summary.by_kind.entry(record.ability_kind).or_insert(0) += 1;
        }
        summary
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}

/// A character's violations at one point in time. Replaced wholesale on each
/// re-evaluation; serializable so hosts can persist and restore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegritySnapshot {
    pub character_id: CharacterId,
    pub evaluated_at: DateTime<Utc>,
    pub violations: BTreeMap<AbilityId, ViolationRecord>,
    pub summary: ViolationSummary,
}

impl IntegritySnapshot {
    pub fn new(
        character_id: CharacterId,
        evaluated_at: DateTime<Utc>,
        records: Vec<ViolationRecord>,
    ) -> Self {
        let summary = ViolationSummary::from_records(&records);
        let violations = records
            .into_iter()
            .map(|r| (r.ability_id.clone(), r))
            .collect();
        Self {
            character_id,
            evaluated_at,
            violations,
            summary,
        }
    }
}

/// Comparison of two integrity snapshots. Every list is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViolationDiff {
    /// Violating now, not before.
    pub new: Vec<AbilityId>,
    /// Violating before, not now.
    pub resolved: Vec<AbilityId>,
    /// Violating in both, with a different set of missing conditions.
    pub changed: Vec<AbilityId>,
    /// Violating in both with the same missing conditions.
    pub unchanged: Vec<AbilityId>,
}

impl ViolationDiff {
    /// No new, resolved, or changed violations. `unchanged` does not count.
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.resolved.is_empty() && self.changed.is_empty()
    }
}

/// Output of one re-evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub character_id: CharacterId,
    /// Sorted by ability id.
    pub violations: Vec<ViolationRecord>,
    pub diff: ViolationDiff,
    pub summary: ViolationSummary,
    pub overall: Severity,
    pub evaluated_at: DateTime<Utc>,
    /// The run could not evaluate the character; nothing was stored.
    pub degraded: bool,
}

impl IntegrityReport {
    pub(crate) fn degraded(character_id: CharacterId, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            character_id,
            violations: Vec::new(),
            diff: ViolationDiff::default(),
            summary: ViolationSummary::default(),
            overall: Severity::None,
            evaluated_at,
            degraded: true,
        }
    }
}
