//! Progression compiling: (snapshot, intent) → validated, unapplied delta.

pub mod compiler;
pub mod delta;
pub mod intent;

pub use compiler::{CompiledPlan, ProgressionCompiler};
pub use delta::Delta;
pub use intent::Intent;
