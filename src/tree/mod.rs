// btree-persist/src/tree/mod.rs

pub mod btree;
pub mod cursor;

pub use btree::{BTree, MAX_DEGREE};
pub use cursor::Iter;
