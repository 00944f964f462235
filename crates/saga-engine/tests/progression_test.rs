//! Tests for the progression compiler: intents, deltas, and plans.

use std::sync::Arc;

use saga_core::config::{AbilityIncreaseMethod, HouseRules};
use saga_core::errors::{CompileError, SagaErrorCode, StructureError};
use saga_core::prerequisite::{Expression, Prerequisite};
use saga_core::snapshot::{Ability, AbilityKind, AbilityScores, CharacterSnapshot, OwnedAbility};
use saga_core::traits::{AbilityDefinition, ClassDefinition};
use saga_core::types::AbilityId;
use saga_engine::progression::delta::{ADD_CLASSES, ADD_PENDING_GRANTS};
use saga_engine::{Delta, Intent, ProgressionCompiler, StaticRuleData};
use serde_json::json;

fn feat(id: &str, name: &str, prerequisite: Option<Prerequisite>) -> AbilityDefinition {
    AbilityDefinition {
        id: id.into(),
        name: name.into(),
        kind: AbilityKind::Feat,
        tree: None,
        prerequisite,
        repeatable: false,
    }
}

fn talent(id: &str, name: &str, tree: &str, prerequisite: Option<Prerequisite>) -> AbilityDefinition {
    AbilityDefinition {
        id: id.into(),
        name: name.into(),
        kind: AbilityKind::Talent,
        tree: Some(tree.into()),
        prerequisite,
        repeatable: false,
    }
}

fn rules() -> StaticRuleData {
    StaticRuleData::with_prestige_classes()
        .feat_entry(feat("power-attack", "Power Attack", Some(Prerequisite::Legacy("Str 13".into()))))
        .feat_entry(feat(
            "cleave",
            "Cleave",
            Some(Expression::all(vec![Expression::feat("Power Attack"), Expression::bab(1)]).into()),
        ))
        .feat_entry(AbilityDefinition {
            repeatable: true,
            ..feat("skill-focus", "Skill Focus", None)
        })
        .talent_entry(talent("acute-senses", "Acute Senses", "Awareness", None))
        .talent_entry(talent(
            "keen-shot",
            "Keen Shot",
            "Awareness",
            Some(Expression::talents_from(&["Awareness"], 1).into()),
        ))
        .class_entry(ClassDefinition {
            id: "scout".into(),
            name: "Scout".into(),
            prestige: false,
            prerequisite: None,
        })
}

fn compiler() -> ProgressionCompiler {
    ProgressionCompiler::new(Arc::new(rules()))
}

fn hero() -> CharacterSnapshot {
    CharacterSnapshot::builder("pc-1")
        .level(2)
        .base_attack_bonus(1)
        .abilities(AbilityScores::uniform(10).with(Ability::Strength, 14))
        .class_level("scout", 2)
        .owned(OwnedAbility::feat("skill-focus", "Skill Focus"))
        .trained("Perception")
        .build()
}

/// PRG-01: a legal feat yields an add delta and leaves the snapshot alone.
#[test]
fn test_choose_feat() {
    let snapshot = hero();
    let delta = compiler()
        .compile(&snapshot, &Intent::choose_feat("power-attack"))
        .unwrap();
    assert_eq!(delta, Delta::new().add("feats", "power-attack"));
    assert!(!snapshot.owns(&AbilityId::new("power-attack")));
}

/// PRG-02: unmet prerequisites fail with the evaluator's list verbatim.
#[test]
fn test_unmet_feat() {
    let err = compiler()
        .compile(&hero(), &Intent::choose_feat("cleave"))
        .unwrap_err();
    let validation = err.validation().unwrap();
    assert_eq!(validation.unmet, vec!["Feat: Power Attack"]);
    assert_eq!(validation.target, "cleave");
    assert_eq!(err.to_string(), "Prerequisites not met for Cleave: Feat: Power Attack");
    assert_eq!(err.error_code(), "VALIDATION_FAILED");
}

/// PRG-03: owned non-repeatable content is rejected; repeatable is fine.
#[test]
fn test_duplicates() {
    let owned = hero()
        .to_builder()
        .owned(OwnedAbility::feat("power-attack", "Power Attack"))
        .build();
    let err = compiler()
        .compile(&owned, &Intent::choose_feat("power-attack"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Power Attack is already known.");
    assert!(compiler()
        .compile(&owned, &Intent::choose_feat("skill-focus"))
        .is_ok());
}

/// PRG-04: unknown content ids are validation failures naming the id.
#[test]
fn test_unknown_content() {
    for intent in [
        Intent::choose_feat("nope"),
        Intent::choose_talent("nope"),
        Intent::level_up("nope"),
    ] {
        let err = compiler().compile(&hero(), &intent).unwrap_err();
        let validation = err.validation().unwrap();
        assert_eq!(validation.target, "nope");
        assert!(validation.message.contains("nope"));
        assert!(validation.unmet.is_empty());
    }
}

/// PRG-05: talents evaluate tree counts against what is already owned.
#[test]
fn test_choose_talent() {
    let err = compiler()
        .compile(&hero(), &Intent::choose_talent("keen-shot"))
        .unwrap_err();
    assert_eq!(
        err.validation().unwrap().unmet,
        vec!["1 talent(s) from: Awareness (you have 0)"]
    );

    let with_senses = hero()
        .to_builder()
        .owned(OwnedAbility::talent("acute-senses", "Acute Senses", "Awareness"))
        .build();
    let delta = compiler()
        .compile(&with_senses, &Intent::choose_talent("keen-shot"))
        .unwrap();
    assert_eq!(delta.added("talents"), ["keen-shot".to_string()]);
}

/// PRG-06: skill budget is level × points-per-level minus trained skills.
#[test]
fn test_skill_budget() {
    let full = CharacterSnapshot::builder("pc-1")
        .level(1)
        .trained("Perception")
        .trained("Stealth")
        .trained("Survival")
        .trained("Mechanics")
        .build();
    let err = compiler()
        .compile(&full, &Intent::choose_skill("Pilot"))
        .unwrap_err();
    let validation = err.validation().unwrap();
    assert_eq!(validation.message, "No skill points available.");
    assert!(validation.unmet.is_empty());

    let delta = compiler()
        .compile(&hero(), &Intent::choose_skill("Pilot"))
        .unwrap();
    assert_eq!(delta.added("trainedSkills"), ["Pilot".to_string()]);

    let err = compiler()
        .compile(&hero(), &Intent::choose_skill("perception"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Already trained in perception.");
}

/// PRG-07: house rules change the skill budget.
#[test]
fn test_skill_budget_house_rule() {
    let generous = StaticRuleData::new().with_house_rules(HouseRules {
        skill_points_per_level: 5,
        ..HouseRules::default()
    });
    let snapshot = CharacterSnapshot::builder("pc-1")
        .level(1)
        .trained("A")
        .trained("B")
        .trained("C")
        .trained("D")
        .build();
    assert!(ProgressionCompiler::new(Arc::new(generous))
        .compile(&snapshot, &Intent::choose_skill("E"))
        .is_ok());
}

/// PRG-08: level-up sets level and class level, adds new classes, records grants.
#[test]
fn test_level_up_delta() {
    let delta = compiler()
        .compile(&hero(), &Intent::level_up("scout"))
        .unwrap();
    assert_eq!(delta.set.get("level"), Some(&json!(3)));
    assert_eq!(delta.set.get("classLevels.scout"), Some(&json!(3)));
    assert!(delta.added(ADD_CLASSES).is_empty());
    assert_eq!(delta.added(ADD_PENDING_GRANTS), ["general-feat".to_string()]);

    let level_three = hero()
        .to_builder()
        .level(3)
        .class_level("scout", 3)
        .build();
    let delta = compiler()
        .compile(&level_three, &Intent::level_up("scout"))
        .unwrap();
    assert_eq!(
        delta.added(ADD_PENDING_GRANTS),
        ["ability-increase:standard".to_string()]
    );
}

/// PRG-09: the ability increase grant names the configured method; first class level adds the class.
#[test]
fn test_level_up_new_class_flexible() {
    let rules = rules().with_house_rules(HouseRules {
        ability_increase_method: AbilityIncreaseMethod::Flexible,
        ..HouseRules::default()
    });
    let snapshot = CharacterSnapshot::builder("pc-1")
        .level(11)
        .class_level("soldier", 11)
        .build();
    let delta = ProgressionCompiler::new(Arc::new(rules))
        .compile(&snapshot, &Intent::level_up("scout"))
        .unwrap();
    assert_eq!(delta.added(ADD_CLASSES), ["scout".to_string()]);
    assert_eq!(delta.set.get("classLevels.scout"), Some(&json!(1)));
    assert_eq!(
        delta.added(ADD_PENDING_GRANTS),
        ["general-feat".to_string(), "ability-increase:flexible".to_string()]
    );
}

/// PRG-10: JSON intents: structure errors, unknown types.
#[test]
fn test_compile_json() {
    let c = compiler();
    let delta = c
        .compile_json(&hero(), &json!({"type": "chooseFeat", "featId": "power-attack"}))
        .unwrap();
    assert_eq!(delta.added("feats"), ["power-attack".to_string()]);

    assert_eq!(
        c.compile_json(&hero(), &json!({"type": "chooseFeat"})).unwrap_err(),
        CompileError::Structure(StructureError::MissingField {
            field: "featId".into()
        })
    );
    assert_eq!(
        c.compile_json(&hero(), &json!({"type": "levelUp", "classId": 7}))
            .unwrap_err(),
        CompileError::Structure(StructureError::WrongType {
            field: "classId".into(),
            expected: "string".into()
        })
    );
    assert!(matches!(
        c.compile_json(&hero(), &json!({"featId": "x"})).unwrap_err(),
        CompileError::Structure(StructureError::MissingField { .. })
    ));
    assert!(matches!(
        c.compile_json(&hero(), &json!("chooseFeat")).unwrap_err(),
        CompileError::Structure(StructureError::WrongType { .. })
    ));
    let err = c
        .compile_json(&hero(), &json!({"type": "respec", "classId": "x"}))
        .unwrap_err();
    assert_eq!(err, CompileError::UnknownIntent { kind: "respec".into() });
    assert_eq!(err.error_code(), "UNKNOWN_INTENT");
}

/// PRG-11: plans preview each step onto a fresh snapshot.
#[test]
fn test_compile_plan() {
    let snapshot = hero();
    let plan = compiler()
        .compile_plan(
            &snapshot,
            &[
                Intent::choose_feat("power-attack"),
                Intent::choose_feat("cleave"),
                Intent::choose_talent("acute-senses"),
                Intent::choose_talent("keen-shot"),
                Intent::level_up("scout"),
            ],
        )
        .unwrap();
    assert_eq!(plan.deltas.len(), 5);
    assert_eq!(plan.preview.level(), 3);
    assert!(plan.preview.owns(&AbilityId::new("cleave")));
    assert!(plan.preview.owns(&AbilityId::new("keen-shot")));
    assert_eq!(plan.preview.class_level(&AbilityId::new("scout")), 3);
    assert_eq!(snapshot.level(), 2);
    assert!(!snapshot.owns(&AbilityId::new("power-attack")));
}

/// PRG-12: a failing plan step reports its index.
#[test]
fn test_plan_failure_step() {
    let err = compiler()
        .compile_plan(
            &hero(),
            &[Intent::choose_feat("power-attack"), Intent::choose_feat("power-attack")],
        )
        .unwrap_err();
    match &err {
        CompileError::AtStep { step, .. } => assert_eq!(*step, 1),
        other => panic!("expected AtStep, got {other:?}"),
    }
    assert_eq!(err.validation().unwrap().target, "power-attack");
    assert_eq!(err.to_string(), "Step 1 failed: Power Attack is already known.");
}

/// PRG-13: compiling is deterministic.
#[test]
fn test_deterministic() {
    let c = compiler();
    let intent = Intent::level_up("bounty-hunter");
    let snapshot = hero().to_builder().level(7).class_level("scout", 7).trained("Survival").build();
    let first = c.compile(&snapshot, &intent);
    let second = c.compile(&snapshot, &intent);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&c.compile(&hero(), &Intent::level_up("scout")).unwrap()).unwrap(),
        serde_json::to_string(&c.compile(&hero(), &Intent::level_up("scout")).unwrap()).unwrap()
    );
}

/// PRG-14: intents round-trip through their serde form.
#[test]
fn test_intent_serde_shape() {
    let value = serde_json::to_value(Intent::choose_talent("keen-shot")).unwrap();
    assert_eq!(value, json!({"type": "chooseTalent", "talentId": "keen-shot"}));
    assert_eq!(
        Intent::from_json(&value).unwrap(),
        Intent::choose_talent("keen-shot")
    );
}

/// PRG-15: levelling past the highest representable level is a structure error.
#[test]
fn test_level_up_at_level_ceiling() {
    let capped = hero().to_builder().level(u32::MAX).build();
    let err = compiler()
        .compile(&capped, &Intent::level_up("scout"))
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::Structure(StructureError::InvalidValue { ref field, .. }) if field == "level"
    ));

    let class_capped = hero().to_builder().class_level("scout", u32::MAX).build();
    let err = compiler()
        .compile(&class_capped, &Intent::level_up("scout"))
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::Structure(StructureError::InvalidValue { ref field, .. })
            if field == "classLevels.scout"
    ));
}
