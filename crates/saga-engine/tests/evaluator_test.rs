//! Tests for the prerequisite evaluator and the legacy text adapter.

use saga_core::config::EvaluationConfig;
use saga_core::errors::EvaluationError;
use saga_core::prerequisite::{DarkSideThreshold, Expression, Prerequisite};
use saga_core::snapshot::{Ability, AbilityScores, CharacterSnapshot, OwnedAbility};
use saga_core::types::AbilityId;
use saga_engine::prerequisites::{parse_legacy, PrerequisiteEvaluator};

fn scout() -> CharacterSnapshot {
    CharacterSnapshot::builder("pc-scout")
        .level(6)
        .base_attack_bonus(6)
        .abilities(
            AbilityScores::uniform(10)
                .with(Ability::Dexterity, 12)
                .with(Ability::Wisdom, 14),
        )
        .dark_side_score(13)
        .species("Human")
        .class_level("scout", 6)
        .owned(OwnedAbility::feat("wp-pistols", "Weapon Proficiency (Pistols)"))
        .owned(OwnedAbility::talent("acute-senses", "Acute Senses", "Awareness"))
        .trained("Survival")
        .build()
}

fn eval(expr: &Expression) -> saga_engine::EvaluationResult {
    PrerequisiteEvaluator::new()
        .evaluate(&scout(), expr, None)
        .unwrap()
}

/// EVL-01: level shortfall uses the fixed message.
#[test]
fn test_level_message() {
    let result = eval(&Expression::level(7));
    assert!(!result.satisfied);
    assert_eq!(result.unmet, vec!["Minimum level 7 (you are level 6)"]);
    assert!(!result.permanently_blocked);
}

/// EVL-02: ALL-of reports the de-duplicated union in order.
#[test]
fn test_all_union_deduplicated() {
    let result = eval(&Expression::all(vec![
        Expression::level(7),
        Expression::trained("Stealth"),
        Expression::level(7),
        Expression::trained("Survival"),
    ]));
    assert_eq!(
        result.unmet,
        vec!["Minimum level 7 (you are level 6)", "Trained in Stealth"]
    );
}

/// EVL-03: ANY-of reports one line listing each alternative.
#[test]
fn test_any_reports_every_alternative() {
    let result = eval(&Expression::any(vec![
        Expression::feat("Dodge"),
        Expression::all(vec![Expression::level(9), Expression::bab(8)]),
    ]));
    assert_eq!(
        result.unmet,
        vec![
            "One of: Feat: Dodge or Minimum level 9 (you are level 6) and Base attack bonus +8 (you have +6)"
        ]
    );

    let met = eval(&Expression::any(vec![
        Expression::feat("Dodge"),
        Expression::trained("survival"),
    ]));
    assert!(met.satisfied);
    assert!(met.unmet.is_empty());
}

/// EVL-04: names match after case and punctuation normalization.
#[test]
fn test_name_normalization() {
    assert!(eval(&Expression::feat("weapon proficiency pistols")).satisfied);
    assert!(eval(&Expression::feat("Weapon Proficiency - Pistols")).satisfied);
    assert!(eval(&Expression::talent("ACUTE SENSES")).satisfied);
    assert!(eval(&Expression::talent("acute-senses")).satisfied);
    assert_eq!(
        eval(&Expression::talent("Weapon Proficiency (Pistols)")).unmet,
        vec!["Talent: Weapon Proficiency (Pistols)"]
    );
}

/// EVL-05: species restriction is structural.
#[test]
fn test_species_is_structural() {
    let result = eval(&Expression::species(&["Wookiee", "Trandoshan"]));
    assert!(result.permanently_blocked);
    assert_eq!(result.unmet, vec!["Species: Wookiee or Trandoshan (you are Human)"]);
    assert!(eval(&Expression::species(&["human"])).satisfied);
}

/// EVL-06: droid systems on a non-droid are structural; on a droid they are not.
#[test]
fn test_droid_systems() {
    let expr = Expression::droid_systems(&["Heuristic Processor", "Translator Unit"]);
    let organic = eval(&expr);
    assert!(organic.permanently_blocked);
    assert_eq!(
        organic.unmet,
        vec!["Droid system(s): Heuristic Processor, Translator Unit (not a droid)"]
    );

    let droid = CharacterSnapshot::builder("r5")
        .level(2)
        .droid(&["Translator Unit"])
        .build();
    let result = PrerequisiteEvaluator::new()
        .evaluate(&droid, &expr, None)
        .unwrap();
    assert!(!result.permanently_blocked);
    assert_eq!(result.unmet, vec!["Droid system(s): Heuristic Processor"]);
}

/// EVL-07: "equals Wisdom" is satisfied at or above the Wisdom score.
#[test]
fn test_dark_side_equals_wisdom() {
    let expr = Expression::dark_side(DarkSideThreshold::EqualsWisdom);
    assert_eq!(
        eval(&expr).unmet,
        vec!["Dark Side Score equal to Wisdom 14 (you have 13)"]
    );

    for dss in [14, 15] {
        let snap = scout().to_builder().dark_side_score(dss).build();
        let result = PrerequisiteEvaluator::new()
            .evaluate(&snap, &expr, None)
            .unwrap();
        assert!(result.satisfied, "dss {dss} should satisfy");
    }

    assert_eq!(
        eval(&Expression::dark_side(DarkSideThreshold::AtLeast(15))).unmet,
        vec!["Dark Side Score 15 (you have 13)"]
    );
}

/// EVL-08: ANY-of is permanent only when every alternative is.
#[test]
fn test_any_permanence() {
    let mixed = eval(&Expression::any(vec![
        Expression::species(&["Wookiee"]),
        Expression::level(9),
    ]));
    assert!(!mixed.permanently_blocked);

    let hopeless = eval(&Expression::any(vec![
        Expression::species(&["Wookiee"]),
        Expression::species(&["Ithorian"]),
    ]));
    assert!(hopeless.permanently_blocked);
}

/// EVL-09: an empty ANY-of is a malformed expression.
#[test]
fn test_empty_any_is_error() {
    let err = PrerequisiteEvaluator::new()
        .evaluate(&scout(), &Expression::any(vec![]), None)
        .unwrap_err();
    assert_eq!(err, EvaluationError::EmptyAlternatives);
}

/// EVL-10: tree counting skips the excluded ability.
#[test]
fn test_tree_count_excludes_self() {
    let expr = Expression::talents_from(&["Awareness"], 1);
    let evaluator = PrerequisiteEvaluator::new();
    let with_self = evaluator.evaluate(&scout(), &expr, None).unwrap();
    assert!(with_self.satisfied);

    let excluded = evaluator
        .evaluate(&scout(), &expr, Some(&AbilityId::new("acute-senses")))
        .unwrap();
    assert_eq!(excluded.unmet, vec!["1 talent(s) from: Awareness (you have 0)"]);
}

/// EVL-11: attribute and BAB messages.
#[test]
fn test_attribute_and_bab_messages() {
    assert_eq!(
        eval(&Expression::attribute(Ability::Strength, 13)).unmet,
        vec!["Strength 13 (you have 10)"]
    );
    assert_eq!(
        eval(&Expression::bab(7)).unmet,
        vec!["Base attack bonus +7 (you have +6)"]
    );
}

/// EVL-12: legacy text is parsed, evaluated, and unknown clauses fail open.
#[test]
fn test_legacy_prerequisite() {
    let prerequisite =
        Prerequisite::Legacy("Dex 13, Base attack bonus +1, Trained in Stealth; Must be a bounty hunter.".into());
    let result = PrerequisiteEvaluator::new()
        .evaluate_prerequisite(&scout(), &prerequisite, None)
        .unwrap();
    assert_eq!(
        result.unmet,
        vec!["Dexterity 13 (you have 12)", "Trained in Stealth"]
    );
    assert_eq!(result.diagnostics, vec!["Must be a bounty hunter"]);
}

/// EVL-13: "requires X" accepts a feat or a talent.
#[test]
fn test_legacy_requires_feat_or_talent() {
    let parsed = parse_legacy("Requires Acute Senses");
    assert!(parsed.unparsed.is_empty());
    let result = PrerequisiteEvaluator::new()
        .evaluate(&scout(), &parsed.expression, None)
        .unwrap();
    assert!(result.satisfied);

    let result = PrerequisiteEvaluator::new()
        .evaluate_prerequisite(&scout(), &Prerequisite::Legacy("Requires Dodge".into()), None)
        .unwrap();
    assert_eq!(result.unmet, vec!["One of: Feat: Dodge or Talent: Dodge"]);
}

/// EVL-14: configured depth limit applies.
#[test]
fn test_depth_from_config() {
    let config = EvaluationConfig {
        max_expression_depth: Some(2),
        ..Default::default()
    };
    let evaluator = PrerequisiteEvaluator::from_config(&config);
    let nested = Expression::all(vec![Expression::all(vec![Expression::level(1)])]);
    assert_eq!(
        evaluator.evaluate(&scout(), &nested, None).unwrap_err(),
        EvaluationError::DepthExceeded { max: 2 }
    );
    assert!(evaluator
        .evaluate(&scout(), &Expression::all(vec![Expression::level(1)]), None)
        .unwrap()
        .satisfied);
}

/// EVL-15: a missing optional prerequisite is always met.
#[test]
fn test_absent_prerequisite() {
    let result = PrerequisiteEvaluator::new()
        .evaluate_optional(&scout(), None, None)
        .unwrap();
    assert!(result.satisfied);
}
