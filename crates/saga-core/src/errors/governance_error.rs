//! Governance errors.

use super::error_code::{self, SagaErrorCode};

/// Errors raised by governance mode transitions. Every variant leaves the
/// stored mode unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GovernanceError {
    #[error("Actor {actor} ({role}) may not change governance settings")]
    Unauthorized { actor: String, role: String },

    #[error("Illegal governance transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },

    #[error("A reason is required to change governance mode")]
    MissingReason,

    #[error("Governance state for {character_id} changed concurrently")]
    Conflict { character_id: String },

    #[error("Governance store error: {0}")]
    Store(String),
}

impl SagaErrorCode for GovernanceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => error_code::UNAUTHORIZED,
            Self::IllegalTransition { .. } => error_code::ILLEGAL_TRANSITION,
            Self::MissingReason | Self::Conflict { .. } | Self::Store(_) => {
                error_code::GOVERNANCE_ERROR
            }
        }
    }
}
