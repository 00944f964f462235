//! Severity classification: evaluation results → graded severity.

pub mod classifier;
pub mod types;

pub use classifier::SeverityClassifier;
pub use types::Severity;
