//! Violation diffing between consecutive integrity snapshots.

use std::collections::BTreeSet;

use super::types::{IntegritySnapshot, ViolationDiff, ViolationRecord};

/// Diff `current` against `previous`. With no previous snapshot every current
/// violation is new.
pub fn diff_snapshots(
    previous: Option<&IntegritySnapshot>,
    current: &IntegritySnapshot,
) -> ViolationDiff {
    let mut diff = ViolationDiff::default();

    let Some(previous) = previous else {
        diff.new = current.violations.keys().cloned().collect();
        return diff;
    };

    // BTreeMap iteration keeps every list sorted.
    for (id, record) in &current.violations {
        match previous.violations.get(id) {
            None => diff.new.push(id.clone()),
            Some(before) if same_conditions(before, record) => diff.unchanged.push(id.clone()),
            Some(_) => diff.changed.push(id.clone()),
        }
    }
    diff.resolved = previous
        .violations
        .keys()
        .filter(|id| !current.violations.contains_key(*id))
        .cloned()
        .collect();
    diff
}

fn same_conditions(a: &ViolationRecord, b: &ViolationRecord) -> bool {
    let left: BTreeSet<&str> = a.missing_conditions.iter().map(String::as_str).collect();
    let right: BTreeSet<&str> = b.missing_conditions.iter().map(String::as_str).collect();
    left == right
}
