//! PrerequisiteEvaluator — walks a prerequisite tree against a snapshot.
//!
//! ALL-of reports the union of every failing child; ANY-of reports one
//! "One of: …" line listing every alternative's shortfall. Evaluation is a
//! pure function of its inputs.

use saga_core::config::EvaluationConfig;
use saga_core::errors::EvaluationError;
use saga_core::prerequisite::{Condition, DarkSideThreshold, Expression, Prerequisite};
use saga_core::snapshot::{Ability, AbilityKind, CharacterSnapshot};
use saga_core::types::collections::{FxHashSet, SmallVec4};
use saga_core::types::{normalize_key, AbilityId};
use tracing::debug;

use super::legacy::parse_legacy;
use super::types::EvaluationResult;

/// Default maximum composite nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Evaluates prerequisite expressions. Holds only configuration.
#[derive(Debug, Clone)]
pub struct PrerequisiteEvaluator {
    max_depth: usize,
    legacy_diagnostics: bool,
}

impl Default for PrerequisiteEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Intermediate outcome of one node.
struct Outcome {
    satisfied: bool,
    unmet: SmallVec4<String>,
    permanent: bool,
}

impl Outcome {
    fn met() -> Self {
        Self {
            satisfied: true,
            unmet: SmallVec4::new(),
            permanent: false,
        }
    }

    fn unmet(message: String) -> Self {
        let mut unmet = SmallVec4::new();
        unmet.push(message);
        Self {
            satisfied: false,
            unmet,
            permanent: false,
        }
    }

    fn structural(message: String) -> Self {
        Self {
            permanent: true,
            ..Self::unmet(message)
        }
    }
}

/// Normalized lookup tables built once per evaluation.
struct OwnedIndex<'a> {
    snapshot: &'a CharacterSnapshot,
    exclude: Option<&'a AbilityId>,
    feats: FxHashSet<String>,
    talents: FxHashSet<String>,
}

impl<'a> OwnedIndex<'a> {
    fn build(snapshot: &'a CharacterSnapshot, exclude: Option<&'a AbilityId>) -> Self {
        let mut feats = FxHashSet::default();
        let mut talents = FxHashSet::default();
        for owned in snapshot.owned() {
            let target = match owned.kind {
                AbilityKind::Feat => &mut feats,
                AbilityKind::Talent => &mut talents,
                _ => continue,
            };
            target.insert(normalize_key(&owned.name));
            target.insert(normalize_key(owned.id.as_str()));
        }
        Self {
            snapshot,
            exclude,
            feats,
            talents,
        }
    }

    fn talents_in_trees(&self, trees: &[String]) -> usize {
        let wanted: FxHashSet<String> = trees.iter().map(|t| normalize_key(t)).collect();
        self.snapshot
            .owned_of_kind(AbilityKind::Talent)
            .filter(|t| Some(&t.id) != self.exclude)
            .filter(|t| {
                t.tree
                    .as_deref()
                    .is_some_and(|tree| wanted.contains(&normalize_key(tree)))
            })
            .count()
    }
}

impl PrerequisiteEvaluator {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            legacy_diagnostics: true,
        }
    }

    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self {
            max_depth: config.effective_max_expression_depth(),
            legacy_diagnostics: config.effective_legacy_diagnostics(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate a structured expression.
    ///
    /// `exclude` is left out of talent-tree counting so an owned talent never
    /// satisfies its own tree requirement.
    pub fn evaluate(
        &self,
        snapshot: &CharacterSnapshot,
        expression: &Expression,
        exclude: Option<&AbilityId>,
    ) -> Result<EvaluationResult, EvaluationError> {
        let index = OwnedIndex::build(snapshot, exclude);
        let outcome = self.eval_node(&index, expression, 1)?;
        if outcome.satisfied {
            return Ok(EvaluationResult::satisfied());
        }
        Ok(EvaluationResult::unsatisfied(
            outcome.unmet.into_vec(),
            outcome.permanent,
        ))
    }

    /// Evaluate a prerequisite as attached to an ability, parsing legacy text
    /// first. Unparseable legacy clauses are met and reported as diagnostics.
    pub fn evaluate_prerequisite(
        &self,
        snapshot: &CharacterSnapshot,
        prerequisite: &Prerequisite,
        exclude: Option<&AbilityId>,
    ) -> Result<EvaluationResult, EvaluationError> {
        match prerequisite {
            Prerequisite::Structured(expr) => self.evaluate(snapshot, expr, exclude),
            Prerequisite::Legacy(text) => {
                let parsed = parse_legacy(text);
                if self.legacy_diagnostics && !parsed.unparsed.is_empty() {
                    debug!(
                        text = %text,
                        unparsed = ?parsed.unparsed,
                        "legacy prerequisite clauses not understood; treated as met"
                    );
                }
                let mut result = self.evaluate(snapshot, &parsed.expression, exclude)?;
                result.diagnostics = parsed.unparsed;
                Ok(result)
            }
        }
    }

    /// Evaluate an optional prerequisite; `None` is always met.
    pub fn evaluate_optional(
        &self,
        snapshot: &CharacterSnapshot,
        prerequisite: Option<&Prerequisite>,
        exclude: Option<&AbilityId>,
    ) -> Result<EvaluationResult, EvaluationError> {
        match prerequisite {
            Some(p) => self.evaluate_prerequisite(snapshot, p, exclude),
            None => Ok(EvaluationResult::satisfied()),
        }
    }

    fn eval_node(
        &self,
        index: &OwnedIndex<'_>,
        expr: &Expression,
        depth: usize,
    ) -> Result<Outcome, EvaluationError> {
        if depth > self.max_depth {
            return Err(EvaluationError::DepthExceeded {
                max: self.max_depth,
            });
        }
        match expr {
            Expression::Condition { condition } => Ok(eval_condition(index, condition)),
            Expression::All { items } => {
                let mut all = Outcome::met();
                for item in items {
                    let child = self.eval_node(index, item, depth + 1)?;
                    if child.satisfied {
                        continue;
                    }
                    all.satisfied = false;
                    all.permanent |= child.permanent;
                    for message in child.unmet {
                        if !all.unmet.contains(&message) {
                            all.unmet.push(message);
                        }
                    }
                }
                Ok(all)
            }
            Expression::Any { items } => {
                if items.is_empty() {
                    return Err(EvaluationError::EmptyAlternatives);
                }
                let mut alternatives = Vec::with_capacity(items.len());
                let mut all_permanent = true;
                for item in items {
                    let child = self.eval_node(index, item, depth + 1)?;
                    if child.satisfied {
                        return Ok(Outcome::met());
                    }
                    all_permanent &= child.permanent;
                    alternatives.push(child.unmet.join(" and "));
                }
                let mut outcome =
                    Outcome::unmet(format!("One of: {}", alternatives.join(" or ")));
                outcome.permanent = all_permanent;
                Ok(outcome)
            }
        }
    }
}

fn eval_condition(index: &OwnedIndex<'_>, condition: &Condition) -> Outcome {
    let snap = index.snapshot;
    match condition {
        Condition::Feat { name } => {
            if index.feats.contains(&normalize_key(name)) {
                Outcome::met()
            } else {
                Outcome::unmet(format!("Feat: {name}"))
            }
        }
        Condition::Talent { name } => {
            if index.talents.contains(&normalize_key(name)) {
                Outcome::met()
            } else {
                Outcome::unmet(format!("Talent: {name}"))
            }
        }
        Condition::TalentsFromTree { trees, count } => {
            let have = index.talents_in_trees(trees);
            if have >= *count as usize {
                Outcome::met()
            } else {
                Outcome::unmet(format!(
                    "{count} talent(s) from: {} (you have {have})",
                    trees.join(", ")
                ))
            }
        }
        Condition::Attribute { ability, min } => {
            let score = snap.abilities().score(*ability);
            if score >= *min {
                Outcome::met()
            } else {
                Outcome::unmet(format!("{ability} {min} (you have {score})"))
            }
        }
        Condition::TrainedSkill { skill } => {
            if snap.is_trained_in(skill) {
                Outcome::met()
            } else {
                Outcome::unmet(format!("Trained in {skill}"))
            }
        }
        Condition::BaseAttackBonus { min } => {
            let bab = snap.base_attack_bonus();
            if bab >= *min {
                Outcome::met()
            } else {
                Outcome::unmet(format!("Base attack bonus {min:+} (you have {bab:+})"))
            }
        }
        Condition::Level { min } => {
            let level = snap.level();
            if level >= *min {
                Outcome::met()
            } else {
                Outcome::unmet(format!("Minimum level {min} (you are level {level})"))
            }
        }
        Condition::DarkSideScore { threshold } => {
            let dss = snap.dark_side_score();
            match threshold {
                DarkSideThreshold::AtLeast(min) => {
                    if dss >= *min {
                        Outcome::met()
                    } else {
                        Outcome::unmet(format!("Dark Side Score {min} (you have {dss})"))
                    }
                }
                DarkSideThreshold::EqualsWisdom => {
                    let wis = u32::from(snap.abilities().score(Ability::Wisdom));
                    if dss >= wis {
                        Outcome::met()
                    } else {
                        Outcome::unmet(format!(
                            "Dark Side Score equal to Wisdom {wis} (you have {dss})"
                        ))
                    }
                }
            }
        }
        Condition::Species { allowed } => {
            let species = normalize_key(snap.species());
            if allowed.is_empty() || allowed.iter().any(|a| normalize_key(a) == species) {
                Outcome::met()
            } else {
                let current = if snap.species().is_empty() {
                    "unspecified"
                } else {
                    snap.species()
                };
                Outcome::structural(format!(
                    "Species: {} (you are {current})",
                    allowed.join(" or ")
                ))
            }
        }
        Condition::DroidSystems { systems } => {
            if !snap.is_droid() {
                return Outcome::structural(format!(
                    "Droid system(s): {} (not a droid)",
                    systems.join(", ")
                ));
            }
            let installed: FxHashSet<String> =
                snap.droid_systems().iter().map(|s| normalize_key(s)).collect();
            let missing: Vec<&str> = systems
                .iter()
                .filter(|s| !installed.contains(&normalize_key(s)))
                .map(String::as_str)
                .collect();
            if missing.is_empty() {
                Outcome::met()
            } else {
                Outcome::unmet(format!("Droid system(s): {}", missing.join(", ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::snapshot::OwnedAbility;

    fn snap() -> CharacterSnapshot {
        CharacterSnapshot::builder("pc")
            .level(3)
            .owned(OwnedAbility::talent("t1", "Acute Senses", "Awareness"))
            .build()
    }

    #[test]
    fn depth_guard_trips_before_recursing_further() {
        let mut expr = Expression::level(1);
        for _ in 0..5 {
            expr = Expression::all(vec![expr]);
        }
        let evaluator = PrerequisiteEvaluator::new().with_max_depth(3);
        let err = evaluator.evaluate(&snap(), &expr, None).unwrap_err();
        assert_eq!(err, EvaluationError::DepthExceeded { max: 3 });
    }

    #[test]
    fn empty_all_is_vacuously_met() {
        let result = PrerequisiteEvaluator::new()
            .evaluate(&snap(), &Expression::all(vec![]), None)
            .unwrap();
        assert!(result.satisfied);
    }

    #[test]
    fn index_matches_by_id_and_name() {
        let s = snap();
        let index = OwnedIndex::build(&s, None);
        assert!(index.talents.contains("t1"));
        assert!(index.talents.contains("acute senses"));
        assert!(index.feats.is_empty());
    }
}
