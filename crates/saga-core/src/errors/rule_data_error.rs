//! Rule data errors.

use super::error_code::{self, SagaErrorCode};

/// Errors raised while building or loading static rule tables.
#[derive(Debug, thiserror::Error)]
pub enum RuleDataError {
    #[error("Rule table parse error: {0}")]
    Parse(String),

    #[error("Duplicate rule entry: {kind} {id}")]
    Duplicate { kind: String, id: String },

    #[error("Invalid rule entry {id}: {message}")]
    InvalidEntry { id: String, message: String },

    #[error("Rule table not readable: {path}")]
    Io { path: String },
}

impl SagaErrorCode for RuleDataError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_DATA_ERROR
    }
}
