//! SeverityClassifier — pure mapping from evaluation results to severity.

use saga_core::snapshot::AbilityKind;

use super::types::Severity;
use crate::prerequisites::EvaluationResult;

/// Unmet-condition count at which a violation becomes an error.
pub const ERROR_THRESHOLD: usize = 3;

/// Stateless classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityClassifier;

impl SeverityClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify by structure and unmet count alone.
    ///
    /// - permanently blocked → Structural (regardless of count)
    /// - satisfied → None
    /// - 1–2 unmet → Warning
    /// - 3+ unmet → Error
    pub fn classify(&self, result: &EvaluationResult) -> Severity {
        if result.permanently_blocked {
            return Severity::Structural;
        }
        if result.satisfied {
            return Severity::None;
        }
        if result.unmet_count() >= ERROR_THRESHOLD {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    /// Classify a violation on an ability of `kind`. Class prerequisites are
    /// never below Error: a class level taken without qualifying is a hard
    /// failure regardless of how little is missing.
    pub fn classify_for(&self, kind: AbilityKind, result: &EvaluationResult) -> Severity {
        let base = self.classify(result);
        if kind == AbilityKind::Class && base == Severity::Warning {
            Severity::Error
        } else {
            base
        }
    }

    /// Overall severity: the maximum present, `None` when empty.
    pub fn classify_all<I>(&self, severities: I) -> Severity
    where
        I: IntoIterator<Item = Severity>,
    {
        severities.into_iter().max().unwrap_or(Severity::None)
    }
}
