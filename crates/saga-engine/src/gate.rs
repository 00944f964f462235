//! ActionGate — the advisory path.
//!
//! Where `ProgressionCompiler` rejects illegal intents outright, the gate runs
//! the same prerequisite check through the severity classifier and the
//! enforcement policy and reports the decision. Illegality is a verdict here,
//! not an error.

use std::sync::Arc;

use saga_core::errors::{CompileError, StructureError, ValidationError};
use saga_core::prerequisite::Prerequisite;
use saga_core::snapshot::{AbilityKind, CharacterSnapshot};
use saga_core::traits::{AbilityDefinition, RuleDataSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::governance::GovernanceState;
use crate::policy::{DecisionOutcome, EnforcementDecision, EnforcementPolicy};
use crate::prerequisites::{EvaluationResult, PrerequisiteEvaluator};
use crate::progression::compiler::{already_known, already_trained, skill_points_available};
use crate::progression::Intent;
use crate::severity::{Severity, SeverityClassifier};

/// What the gate concluded about one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateVerdict {
    /// Id of the feat, talent, class, or skill the intent targets.
    pub target: String,
    pub evaluation: EvaluationResult,
    pub severity: Severity,
    pub decision: EnforcementDecision,
}

impl GateVerdict {
    pub fn outcome(&self) -> DecisionOutcome {
        self.decision.outcome
    }

    pub fn permits(&self) -> bool {
        self.decision.outcome.permits()
    }
}

pub struct ActionGate {
    rules: Arc<dyn RuleDataSource>,
    evaluator: PrerequisiteEvaluator,
    classifier: SeverityClassifier,
    policy: EnforcementPolicy,
}

impl ActionGate {
    pub fn new(rules: Arc<dyn RuleDataSource>) -> Self {
        Self {
            rules,
            evaluator: PrerequisiteEvaluator::new(),
            classifier: SeverityClassifier::new(),
            policy: EnforcementPolicy::new(),
        }
    }

    pub fn with_evaluator(mut self, evaluator: PrerequisiteEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Evaluate `intent` and decide under `governance`.
    ///
    /// Fails only when the intent cannot be resolved at all (unknown content,
    /// malformed input, broken expression).
    pub fn check(
        &self,
        snapshot: &CharacterSnapshot,
        intent: &Intent,
        governance: &GovernanceState,
    ) -> Result<GateVerdict, CompileError> {
        let (target, kind, evaluation) = self.evaluate_intent(snapshot, intent)?;
        let severity = self.classifier.classify_for(kind, &evaluation);
        let count = if evaluation.satisfied {
            0
        } else {
            evaluation.unmet_count()
        };
        let strict = self.rules.house_rules().strict_enforcement;
        let decision = self.policy.evaluate(governance.mode, strict, severity, count);

        debug!(
            character = %snapshot.character_id(),
            intent = intent.kind(),
            %target,
            %severity,
            outcome = %decision.outcome,
            "gate decision"
        );

        Ok(GateVerdict {
            target,
            evaluation,
            severity,
            decision,
        })
    }

    fn evaluate_intent(
        &self,
        snapshot: &CharacterSnapshot,
        intent: &Intent,
    ) -> Result<(String, AbilityKind, EvaluationResult), CompileError> {
        match intent {
            Intent::ChooseFeat { feat_id } => {
                let def = self.rules.feat(feat_id).ok_or_else(|| {
                    ValidationError::new(feat_id.as_str(), format!("Unknown feat: {feat_id}"))
                })?;
                let result = self.evaluate_ability(snapshot, &def)?;
                Ok((feat_id.to_string(), def.kind, result))
            }
            Intent::ChooseTalent { talent_id } => {
                let def = self.rules.talent(talent_id).ok_or_else(|| {
                    ValidationError::new(
                        talent_id.as_str(),
                        format!("Unknown talent: {talent_id}"),
                    )
                })?;
                let result = self.evaluate_ability(snapshot, &def)?;
                Ok((talent_id.to_string(), def.kind, result))
            }
            Intent::LevelUp { class_id } => {
                let class = self.rules.class(class_id).ok_or_else(|| {
                    ValidationError::new(class_id.as_str(), format!("Unknown class: {class_id}"))
                })?;
                let result = self.evaluate(snapshot, class.prerequisite.as_ref())?;
                Ok((class_id.to_string(), AbilityKind::Class, result))
            }
            Intent::ChooseSkill { skill_id } => {
                let skill = skill_id.trim();
                if skill.is_empty() {
                    return Err(StructureError::MissingField {
                        field: "skillId".to_string(),
                    }
                    .into());
                }
                let result = if let Some(message) = already_trained(snapshot, skill) {
                    EvaluationResult::unsatisfied(vec![message], true)
                } else if skill_points_available(snapshot, self.rules.as_ref()) > 0 {
                    EvaluationResult::satisfied()
                } else {
                    EvaluationResult::unsatisfied(
                        vec!["No skill points available.".to_string()],
                        false,
                    )
                };
                // Skills are not abilities; feat is the closest severity profile.
                Ok((skill.to_string(), AbilityKind::Feat, result))
            }
        }
    }

    /// Owning a non-repeatable ability already cannot be fixed by progress, so
    /// it reports as a permanent block.
    fn evaluate_ability(
        &self,
        snapshot: &CharacterSnapshot,
        def: &AbilityDefinition,
    ) -> Result<EvaluationResult, CompileError> {
        if let Some(message) = already_known(snapshot, def) {
            return Ok(EvaluationResult::unsatisfied(vec![message], true));
        }
        self.evaluate(snapshot, def.prerequisite.as_ref())
    }

    fn evaluate(
        &self,
        snapshot: &CharacterSnapshot,
        prerequisite: Option<&Prerequisite>,
    ) -> Result<EvaluationResult, CompileError> {
        Ok(self.evaluator.evaluate_optional(snapshot, prerequisite, None)?)
    }
}
