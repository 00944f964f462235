//! Prerequisite evaluation errors.

use super::error_code::{self, SagaErrorCode};

/// Raised only for malformed expressions; an unmet prerequisite is a result,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Prerequisite expression nests deeper than {max} levels")]
    DepthExceeded { max: usize },

    #[error("ANY-of prerequisite has no alternatives")]
    EmptyAlternatives,
}

impl SagaErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        error_code::EVALUATION_ERROR
    }
}
