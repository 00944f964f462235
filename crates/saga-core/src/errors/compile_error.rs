//! Progression compile errors.

use super::error_code::{self, SagaErrorCode};
use super::{EvaluationError, StructureError};

/// An intent is illegal for the snapshot it was compiled against.
///
/// `message` is what the user sees; `unmet` is the evaluator's list verbatim
/// and is empty for non-prerequisite failures such as an exhausted skill budget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub target: String,
    pub message: String,
    pub unmet: Vec<String>,
}

impl ValidationError {
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
            unmet: Vec::new(),
        }
    }

    pub fn unmet(target: impl Into<String>, name: &str, unmet: Vec<String>) -> Self {
        Self {
            target: target.into(),
            message: format!("Prerequisites not met for {name}: {}", unmet.join("; ")),
            unmet,
        }
    }
}

/// Errors raised by the progression compiler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("Malformed intent: {0}")]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown intent type: {kind}")]
    UnknownIntent { kind: String },

    #[error("Prerequisite evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Step {step} failed: {source}")]
    AtStep {
        step: usize,
        #[source]
        source: Box<CompileError>,
    },
}

impl CompileError {
    /// The innermost validation error, if this failure is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v) => Some(v),
            Self::AtStep { source, .. } => source.validation(),
            _ => None,
        }
    }
}

impl SagaErrorCode for CompileError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Structure(e) => e.error_code(),
            Self::Validation(_) => error_code::VALIDATION_FAILED,
            Self::UnknownIntent { .. } => error_code::UNKNOWN_INTENT,
            Self::Evaluation(e) => e.error_code(),
            Self::AtStep { source, .. } => source.error_code(),
        }
    }
}
