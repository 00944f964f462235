//! Tests for integrity re-evaluation, diffing, and the keyed store.

use std::sync::Arc;

use saga_core::prerequisite::Expression;
use saga_core::snapshot::{AbilityKind, CharacterSnapshot, OwnedAbility};
use saga_core::traits::InMemoryCharacterRepository;
use saga_core::types::{AbilityId, CharacterId};
use saga_engine::{IntegrityStore, IntegrityTracker, Severity};

fn tracker() -> IntegrityTracker {
    IntegrityTracker::new(Arc::new(IntegrityStore::new()))
}

fn id() -> CharacterId {
    CharacterId::new("pc-1")
}

/// Level 4 character holding a feat that needs BAB +5 and a talent that
/// needs a second Awareness talent.
fn drifted() -> CharacterSnapshot {
    CharacterSnapshot::builder("pc-1")
        .level(4)
        .base_attack_bonus(3)
        .species("Human")
        .owned(OwnedAbility::feat("power-attack", "Power Attack"))
        .owned(
            OwnedAbility::feat("cleave", "Cleave")
                .requires(Expression::all(vec![Expression::bab(5), Expression::feat("Power Attack")])),
        )
        .owned(
            OwnedAbility::talent("keen-shot", "Keen Shot", "Awareness")
                .requires(Expression::talents_from(&["Awareness"], 1)),
        )
        .build()
}

/// INT-01: first run reports every violation as new, sorted, and classified.
#[test]
fn test_first_run_everything_new() {
    let report = tracker().reevaluate(&id(), &drifted());
    assert!(!report.degraded);
    assert_eq!(
        report.diff.new,
        vec![AbilityId::new("cleave"), AbilityId::new("keen-shot")]
    );
    assert!(report.diff.resolved.is_empty());
    assert_eq!(report.violations.len(), 2);

    let cleave = &report.violations[0];
    assert_eq!(cleave.ability_kind, AbilityKind::Feat);
    assert_eq!(cleave.missing_conditions, vec!["Base attack bonus +5 (you have +3)"]);
    assert_eq!(cleave.severity, Severity::Warning);

    // Own id excluded from the tree count.
    let keen = &report.violations[1];
    assert_eq!(
        keen.missing_conditions,
        vec!["1 talent(s) from: Awareness (you have 0)"]
    );

    assert_eq!(report.overall, Severity::Warning);
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.count(Severity::Warning), 2);
    assert_eq!(report.summary.by_kind.get(&AbilityKind::Talent), Some(&1));
}

/// INT-02: re-running without changes yields an empty diff.
#[test]
fn test_rerun_empty_diff() {
    let tracker = tracker();
    tracker.reevaluate(&id(), &drifted());
    let second = tracker.reevaluate(&id(), &drifted());
    assert!(second.diff.is_empty());
    assert_eq!(second.diff.unchanged.len(), 2);
}

/// INT-03: fixes resolve, new shortfalls change.
#[test]
fn test_resolved_and_changed() {
    let tracker = tracker();
    tracker.reevaluate(&id(), &drifted());

    let fixed = drifted()
        .to_builder()
        .base_attack_bonus(5)
        .owned(OwnedAbility::talent("acute-senses", "Acute Senses", "Awareness"))
        .build();
    let report = tracker.reevaluate(&id(), &fixed);
    assert_eq!(
        report.diff.resolved,
        vec![AbilityId::new("cleave"), AbilityId::new("keen-shot")]
    );
    assert!(report.violations.is_empty());
    assert_eq!(report.overall, Severity::None);

    let worse = fixed.to_builder().base_attack_bonus(1).build();
    tracker.reevaluate(&id(), &drifted());
    let report = tracker.reevaluate(&id(), &worse);
    assert_eq!(report.diff.changed, vec![AbilityId::new("cleave")]);
    assert_eq!(report.diff.resolved, vec![AbilityId::new("keen-shot")]);
}

/// INT-04: class violations floor at Error; structural beats everything.
#[test]
fn test_class_and_structural_severity() {
    let snapshot = CharacterSnapshot::builder("pc-1")
        .level(8)
        .species("Human")
        .class_level("jedi", 1)
        .owned(
            OwnedAbility::new("jedi-knight", "Jedi Knight", AbilityKind::Class)
                .requires(Expression::feat("Force Sensitivity")),
        )
        .owned(
            OwnedAbility::feat("wookiee-grip", "Wookiee Grip")
                .requires(Expression::species(&["Wookiee"])),
        )
        .build();
    let report = tracker().reevaluate(&id(), &snapshot);
    let severities: Vec<_> = report.violations.iter().map(|v| v.severity).collect();
    assert_eq!(severities, vec![Severity::Error, Severity::Structural]);
    assert!(report.violations[1].permanently_blocked);
    assert_eq!(report.overall, Severity::Structural);
}

/// INT-05: force powers are checked like any other owned ability; abilities
/// without prerequisites are skipped.
#[test]
fn test_force_power_checked_and_unconditioned_skipped() {
    let snapshot = CharacterSnapshot::builder("pc-1")
        .level(1)
        .owned(
            OwnedAbility::new("move-object", "Move Object", AbilityKind::ForcePower)
                .requires(Expression::feat("Force Training")),
        )
        .owned(OwnedAbility::feat("toughness", "Toughness"))
        .build();
    let report = tracker().reevaluate(&id(), &snapshot);
    assert_eq!(report.violations.len(), 1);
    let power = &report.violations[0];
    assert_eq!(power.ability_id, AbilityId::new("move-object"));
    assert_eq!(power.ability_kind, AbilityKind::ForcePower);
    assert_eq!(power.missing_conditions, vec!["Feat: Force Training"]);
    assert_eq!(power.severity, Severity::Warning);
}

/// INT-06: invalid snapshots and id mismatches degrade without touching the store.
#[test]
fn test_degraded_runs_leave_store() {
    let tracker = tracker();
    tracker.reevaluate(&id(), &drifted());
    let before = tracker.current(&id()).unwrap();

    let duplicate = drifted()
        .to_builder()
        .owned(OwnedAbility::feat("cleave", "Cleave"))
        .build();
    let report = tracker.reevaluate(&id(), &duplicate);
    assert!(report.degraded);
    assert!(report.violations.is_empty());

    let other = CharacterSnapshot::builder("pc-2").level(1).build();
    assert!(tracker.reevaluate(&id(), &other).degraded);

    assert_eq!(tracker.current(&id()).unwrap(), before);
}

/// INT-07: an ability whose expression is malformed is omitted, others still report.
#[test]
fn test_evaluation_error_omits_ability() {
    let snapshot = drifted()
        .to_builder()
        .owned(OwnedAbility::feat("broken", "Broken").requires(Expression::any(vec![])))
        .build();
    let report = tracker().reevaluate(&id(), &snapshot);
    assert!(!report.degraded);
    assert_eq!(report.violations.len(), 2);
    assert!(report.violations.iter().all(|v| v.ability_id.as_str() != "broken"));
}

/// INT-08: restore seeds the diff baseline; forget drops it.
#[test]
fn test_restore_and_forget() {
    let first = tracker();
    first.reevaluate(&id(), &drifted());
    let persisted = serde_json::to_string(&*first.current(&id()).unwrap()).unwrap();

    let second = tracker();
    second
        .restore(&id(), serde_json::from_str(&persisted).unwrap())
        .unwrap();
    assert!(second.reevaluate(&id(), &drifted()).diff.is_empty());

    assert!(second.forget(&id()).is_some());
    assert!(second.current(&id()).is_none());
    assert_eq!(second.reevaluate(&id(), &drifted()).diff.new.len(), 2);

    let foreign = first.current(&id()).unwrap().as_ref().clone();
    assert!(second.restore(&CharacterId::new("pc-9"), foreign).is_err());
}

/// INT-09: repository-backed runs load the character, missing ones degrade.
#[test]
fn test_reevaluate_from_repository() {
    let repo = InMemoryCharacterRepository::new();
    repo.put(drifted()).unwrap();
    let tracker = tracker();
    let report = tracker.reevaluate_from(&repo, &id());
    assert_eq!(report.violations.len(), 2);

    let missing = tracker.reevaluate_from(&repo, &CharacterId::new("ghost"));
    assert!(missing.degraded);
    assert!(tracker.current(&CharacterId::new("ghost")).is_none());
}

/// INT-10: characters are tracked independently across threads.
#[test]
fn test_parallel_characters() {
    let tracker = Arc::new(tracker());
    let handles: Vec<_> = (0..6)
        .map(|i| {
            let tracker = tracker.clone();
            std::thread::spawn(move || {
                let cid = CharacterId::new(format!("pc-{i}"));
                let snapshot = CharacterSnapshot::builder(cid.clone())
                    .level(1)
                    .owned(OwnedAbility::feat("f", "F").requires(Expression::level(2)))
                    .build();
                for _ in 0..10 {
                    tracker.reevaluate(&cid, &snapshot);
                }
                tracker.current(&cid).map(|s| s.summary.total)
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), Some(1));
    }
    assert_eq!(tracker.store().len(), 6);
}

/// INT-11: class levels whose sum overflows degrade the report instead of panicking.
#[test]
fn test_overflowing_class_levels_degrade() {
    let snapshot: CharacterSnapshot = serde_json::from_value(serde_json::json!({
        "schemaVersion": 1,
        "characterId": "pc-1",
        "level": 5,
        "classLevels": { "a": u32::MAX, "b": 1 }
    }))
    .unwrap();
    let tracker = tracker();
    let report = tracker.reevaluate(&id(), &snapshot);
    assert!(report.degraded);
    assert!(report.violations.is_empty());
    assert!(tracker.current(&id()).is_none());
}
