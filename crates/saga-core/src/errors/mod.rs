//! Error handling for Saga.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod compile_error;
pub mod config_error;
pub mod error_code;
pub mod evaluation_error;
pub mod governance_error;
pub mod repository_error;
pub mod rule_data_error;
pub mod structure_error;

pub use compile_error::{CompileError, ValidationError};
pub use config_error::ConfigError;
pub use error_code::SagaErrorCode;
pub use evaluation_error::EvaluationError;
pub use governance_error::GovernanceError;
pub use repository_error::RepositoryError;
pub use rule_data_error::RuleDataError;
pub use structure_error::StructureError;
