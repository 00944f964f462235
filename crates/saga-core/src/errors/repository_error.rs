//! Character repository errors.

use super::error_code::{self, SagaErrorCode};
use super::StructureError;

/// Errors raised while loading a character snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Character not found: {0}")]
    NotFound(String),

    #[error("Stored character is malformed: {0}")]
    Malformed(#[from] StructureError),

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

impl SagaErrorCode for RepositoryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(e) => e.error_code(),
            Self::NotFound(_) | Self::Unavailable(_) => error_code::REPOSITORY_ERROR,
        }
    }
}
