//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::{BTreeMap, BTreeSet};

/// SmallVec sized for unmet messages of a single condition group.
pub type SmallVec4<T> = SmallVec<[T; 4]>;
