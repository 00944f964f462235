//! Structure errors: malformed intents and snapshots.

use super::error_code::{self, SagaErrorCode};

/// A payload had the wrong shape. Always raised before any evaluation runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Field {field} has the wrong type: expected {expected}")]
    WrongType { field: String, expected: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Duplicate ability id: {id}")]
    DuplicateAbility { id: String },

    #[error("Unsupported snapshot schema version {found} (supported: {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },
}

impl SagaErrorCode for StructureError {
    fn error_code(&self) -> &'static str {
        error_code::STRUCTURE_ERROR
    }
}
