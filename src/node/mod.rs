// btree-persist/src/node/mod.rs

pub mod definition;

// Re-export key items for easier access from `crate::node::`
pub use definition::{MAX_NODE_ITEMS, Node};
