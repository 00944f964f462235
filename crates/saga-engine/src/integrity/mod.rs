//! Integrity tracking: re-evaluate every owned ability and diff the
//! violations against the previous run.

pub mod diff;
pub mod store;
pub mod tracker;
pub mod types;

pub use diff::diff_snapshots;
pub use store::IntegrityStore;
pub use tracker::IntegrityTracker;
pub use types::{IntegrityReport, IntegritySnapshot, ViolationDiff, ViolationRecord, ViolationSummary};
