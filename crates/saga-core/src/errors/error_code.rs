//! SagaErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that UI and audit layers can match on without parsing messages.
pub trait SagaErrorCode {
    /// Returns the error code string (e.g., "VALIDATION_FAILED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STRUCTURE_ERROR: &str = "STRUCTURE_ERROR";
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const UNKNOWN_INTENT: &str = "UNKNOWN_INTENT";
pub const EVALUATION_ERROR: &str = "EVALUATION_ERROR";
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const ILLEGAL_TRANSITION: &str = "ILLEGAL_TRANSITION";
pub const GOVERNANCE_ERROR: &str = "GOVERNANCE_ERROR";
pub const RULE_DATA_ERROR: &str = "RULE_DATA_ERROR";
pub const REPOSITORY_ERROR: &str = "REPOSITORY_ERROR";
