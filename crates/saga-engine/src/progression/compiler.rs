//! ProgressionCompiler — the hard path. Illegal intents fail with
//! `ValidationError`; legal ones produce a `Delta` that is never applied here.

use std::sync::Arc;

use saga_core::errors::{CompileError, StructureError, ValidationError};
use saga_core::snapshot::CharacterSnapshot;
use saga_core::traits::{AbilityDefinition, RuleDataSource};
use saga_core::types::AbilityId;
use serde_json::Value;
use tracing::debug;

use super::delta::{
    Delta, ADD_CLASSES, ADD_FEATS, ADD_PENDING_GRANTS, ADD_TALENTS, ADD_TRAINED_SKILLS,
    FIELD_CLASS_LEVELS, FIELD_LEVEL,
};
use super::intent::Intent;
use crate::prerequisites::PrerequisiteEvaluator;

/// A general feat is granted on every multiple of this character level.
pub const GENERAL_FEAT_INTERVAL: u32 = 3;
/// An ability increase is granted on every multiple of this character level.
pub const ABILITY_INCREASE_INTERVAL: u32 = 4;

/// Output of `compile_plan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPlan {
    /// One delta per intent, in order.
    pub deltas: Vec<Delta>,
    /// The snapshot after every delta is previewed in turn.
    pub preview: CharacterSnapshot,
}

pub struct ProgressionCompiler {
    rules: Arc<dyn RuleDataSource>,
    evaluator: PrerequisiteEvaluator,
}

impl ProgressionCompiler {
    pub fn new(rules: Arc<dyn RuleDataSource>) -> Self {
        Self {
            rules,
            evaluator: PrerequisiteEvaluator::new(),
        }
    }

    pub fn with_evaluator(mut self, evaluator: PrerequisiteEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn rules(&self) -> &Arc<dyn RuleDataSource> {
        &self.rules
    }

    /// Compile one intent. Deterministic: no clock, randomness, or I/O.
    pub fn compile(
        &self,
        snapshot: &CharacterSnapshot,
        intent: &Intent,
    ) -> Result<Delta, CompileError> {
        debug!(character = %snapshot.character_id(), intent = intent.kind(), "compiling intent");
        match intent {
            Intent::ChooseFeat { feat_id } => {
                let def = self.rules.feat(feat_id).ok_or_else(|| {
                    ValidationError::new(feat_id.as_str(), format!("Unknown feat: {feat_id}"))
                })?;
                self.check_ability(snapshot, &def)?;
                Ok(Delta::new().add(ADD_FEATS, feat_id.as_str()))
            }
            Intent::ChooseTalent { talent_id } => {
                let def = self.rules.talent(talent_id).ok_or_else(|| {
                    ValidationError::new(
                        talent_id.as_str(),
                        format!("Unknown talent: {talent_id}"),
                    )
                })?;
                self.check_ability(snapshot, &def)?;
                Ok(Delta::new().add(ADD_TALENTS, talent_id.as_str()))
            }
            Intent::ChooseSkill { skill_id } => self.compile_skill(snapshot, skill_id),
            Intent::LevelUp { class_id } => self.compile_level_up(snapshot, class_id),
        }
    }

    /// Compile a JSON intent `{type, <idField>}`.
    pub fn compile_json(
        &self,
        snapshot: &CharacterSnapshot,
        value: &Value,
    ) -> Result<Delta, CompileError> {
        let intent = Intent::from_json(value)?;
        self.compile(snapshot, &intent)
    }

    /// Compile a sequence of intents, previewing each delta onto a fresh
    /// snapshot before compiling the next. Fails on the first illegal step.
    pub fn compile_plan(
        &self,
        snapshot: &CharacterSnapshot,
        intents: &[Intent],
    ) -> Result<CompiledPlan, CompileError> {
        let mut current = snapshot.clone();
        let mut deltas = Vec::with_capacity(intents.len());
        for (step, intent) in intents.iter().enumerate() {
            let at_step = |source: CompileError| CompileError::AtStep {
                step,
                source: Box::new(source),
            };
            let delta = self.compile(&current, intent).map_err(at_step)?;
            current = delta
                .preview(&current, self.rules.as_ref())
                .map_err(|e| at_step(e.into()))?;
            deltas.push(delta);
        }
        Ok(CompiledPlan {
            deltas,
            preview: current,
        })
    }

    fn check_ability(
        &self,
        snapshot: &CharacterSnapshot,
        def: &AbilityDefinition,
    ) -> Result<(), CompileError> {
        if let Some(message) = already_known(snapshot, def) {
            return Err(ValidationError::new(def.id.as_str(), message).into());
        }
        // Not yet owned, so there is nothing to exclude from tree counts.
        let result = self
            .evaluator
            .evaluate_optional(snapshot, def.prerequisite.as_ref(), None)?;
        if !result.satisfied {
            debug!(ability = %def.id, unmet = ?result.unmet, "prerequisites not met");
            return Err(ValidationError::unmet(def.id.as_str(), &def.name, result.unmet).into());
        }
        Ok(())
    }

    fn compile_skill(
        &self,
        snapshot: &CharacterSnapshot,
        skill: &str,
    ) -> Result<Delta, CompileError> {
        let skill = skill.trim();
        if skill.is_empty() {
            return Err(StructureError::MissingField {
                field: "skillId".to_string(),
            }
            .into());
        }
        if let Some(message) = already_trained(snapshot, skill) {
            return Err(ValidationError::new(skill, message).into());
        }

        let available = skill_points_available(snapshot, self.rules.as_ref());
        if available <= 0 {
            debug!(skill, available, "skill budget exhausted");
            return Err(ValidationError::new(skill, "No skill points available.").into());
        }
        Ok(Delta::new().add(ADD_TRAINED_SKILLS, skill))
    }

    fn compile_level_up(
        &self,
        snapshot: &CharacterSnapshot,
        class_id: &AbilityId,
    ) -> Result<Delta, CompileError> {
        let class = self.rules.class(class_id).ok_or_else(|| {
            ValidationError::new(class_id.as_str(), format!("Unknown class: {class_id}"))
        })?;
        let result = self
            .evaluator
            .evaluate_optional(snapshot, class.prerequisite.as_ref(), None)?;
        if !result.satisfied {
            debug!(class = %class_id, unmet = ?result.unmet, "class prerequisites not met");
            return Err(
                ValidationError::unmet(class_id.as_str(), &class.name, result.unmet).into(),
            );
        }

        let class_field = format!("{FIELD_CLASS_LEVELS}.{class_id}");
        let level = next_level(snapshot.level(), FIELD_LEVEL)?;
        let class_level = next_level(snapshot.class_level(class_id), &class_field)?;
        let mut delta = Delta::new()
            .set(FIELD_LEVEL, level)
            .set(class_field, class_level);
        if class_level == 1 {
            delta = delta.add(ADD_CLASSES, class_id.as_str());
        }
        if level % GENERAL_FEAT_INTERVAL == 0 {
            delta = delta.add(ADD_PENDING_GRANTS, "general-feat");
        }
        if level % ABILITY_INCREASE_INTERVAL == 0 {
            let method = self.rules.house_rules().ability_increase_method;
            delta = delta.add(ADD_PENDING_GRANTS, format!("ability-increase:{method}"));
        }
        Ok(delta)
    }
}

/// Rejection message for picking an owned, non-repeatable ability again.
pub(crate) fn already_known(
    snapshot: &CharacterSnapshot,
    def: &AbilityDefinition,
) -> Option<String> {
    (snapshot.owns(&def.id) && !def.repeatable)
        .then(|| format!("{} is already known.", def.name))
}

pub(crate) fn already_trained(snapshot: &CharacterSnapshot, skill: &str) -> Option<String> {
    snapshot
        .is_trained_in(skill)
        .then(|| format!("Already trained in {skill}."))
}

/// Level × points-per-level minus skills already trained.
pub(crate) fn skill_points_available(
    snapshot: &CharacterSnapshot,
    rules: &dyn RuleDataSource,
) -> i64 {
    let per_level = i64::from(rules.house_rules().skill_points_per_level);
    i64::from(snapshot.level()) * per_level - snapshot.trained_skills().len() as i64
}

fn next_level(current: u32, field: &str) -> Result<u32, StructureError> {
    current
        .checked_add(1)
        .ok_or_else(|| StructureError::InvalidValue {
            field: field.to_string(),
            message: format!("{current} is already the highest level"),
        })
}
