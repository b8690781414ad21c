// btree-persist/src/lib.rs

//! Byte-exact persistence for an in-memory B-tree.
//!
//! [`save`] writes a tree header and then every node in pre-order; [`load`]
//! rebuilds the same node structure directly, without re-inserting anything.
//! Item payloads are written by a caller-supplied [`ItemCodec`].
//!
//! ```
//! use std::io::Cursor;
//! use btree_persist::{BTree, codec::BigEndianCodec};
//!
//! let mut tree = BTree::new(2, ());
//! for x in [5u32, 3, 8, 1] {
//!     tree.replace_or_insert(x);
//! }
//!
//! let mut bytes = Vec::new();
//! tree.save(&mut bytes, &BigEndianCodec).unwrap();
//!
//! let loaded: BTree<u32> = BTree::load(&mut Cursor::new(bytes), &BigEndianCodec, ()).unwrap();
//! assert_eq!(loaded.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
//! assert_eq!(loaded.len(), 4);
//! ```

pub mod codec;
pub mod common;
pub mod error;
pub mod node;
pub mod store;
pub mod tree;

pub use codec::ItemCodec;
pub use common::{Comparable, PersistConfig};
pub use error::{CodecError, PersistError, Result};
pub use node::{MAX_NODE_ITEMS, Node};
pub use store::{load, load_from_path, load_with_config, save, save_to_path, save_with_config};
pub use tree::{BTree, MAX_DEGREE};
