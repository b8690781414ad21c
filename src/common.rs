// btree-persist/src/common.rs

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default bound on node nesting accepted by `save` and `load`.
/// A B-tree of degree 2 with 64 levels already holds more than 2^64 items.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tuning knobs for saving and loading trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistConfig {
    /// Maximum number of node levels `save` and `load` will descend before
    /// giving up. Guards the recursive decoder against adversarially deep streams.
    pub max_depth: usize,
    /// Initial capacity of the scratch buffer handed to the item codec.
    pub scratch_capacity: usize,
}

impl Default for PersistConfig {
    fn default() -> Self {
        PersistConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            scratch_capacity: 0,
        }
    }
}

/// Three-way comparison of two items under a caller-supplied context.
///
/// The context lets the ordering depend on runtime state (a collation, a
/// key extractor) without storing that state in every item.
pub trait Comparable<C: ?Sized> {
    fn compare(&self, other: &Self, ctx: &C) -> Ordering;
}

impl<T: Ord> Comparable<()> for T {
    fn compare(&self, other: &Self, _ctx: &()) -> Ordering {
        self.cmp(other)
    }
}
