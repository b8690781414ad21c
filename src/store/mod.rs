// btree-persist/src/store/mod.rs

//! Saving and loading whole trees.
//!
//! A saved tree is a [`TreeHeader`] followed, when the tree has a root, by the
//! root's subtree in pre-order (see [`format`]). Nothing is length-prefixed at
//! the subtree level and nothing is checksummed.

pub mod format;
pub(crate) mod node_io;

use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::codec::ItemCodec;
use crate::common::PersistConfig;
use crate::error::{PersistError, Result};
use crate::tree::BTree;

// Re-export key items for easier access from `crate::store::`
pub use format::{NodeHeader, TreeHeader};

/// Writes `tree` to `writer` using the default [`PersistConfig`].
pub fn save<T, C, K, W>(tree: &BTree<T, C>, writer: &mut W, codec: &K) -> Result<()>
where
    K: ItemCodec<T>,
    W: Write,
{
    save_with_config(tree, writer, codec, &PersistConfig::default())
}

/// Writes `tree` to `writer`.
///
/// A subtree nested deeper than `config.max_depth` fails with
/// [`PersistError::TooDeep`], the same limit [`load_with_config`] applies.
/// Stops at the first failing write; the stream is then left in an unusable
/// state. The writer is not flushed.
pub fn save_with_config<T, C, K, W>(tree: &BTree<T, C>, writer: &mut W, codec: &K, config: &PersistConfig) -> Result<()>
where
    K: ItemCodec<T>,
    W: Write,
{
    let header = TreeHeader {
        degree: tree.degree as u64,
        length: tree.length as u64,
        has_root: tree.root.is_some(),
    };
    header.write_to(writer)?;
    debug!(
        "Wrote tree header: degree {}, length {}, root: {}",
        header.degree, header.length, header.has_root
    );

    if let Some(root) = &tree.root {
        node_io::save_node(writer, root, codec, 1, config.max_depth)?;
    }
    debug!("Saved tree of {} items", tree.length);
    Ok(())
}

/// Reads a tree from `reader` using the default [`PersistConfig`].
pub fn load<T, C, K, R>(reader: &mut R, codec: &K, ctx: C) -> Result<BTree<T, C>>
where
    K: ItemCodec<T>,
    R: Read,
{
    load_with_config(reader, codec, ctx, &PersistConfig::default())
}

/// Reads a tree from `reader`.
///
/// The nodes are rebuilt exactly as stored; nothing is re-inserted. On error
/// no tree is returned.
pub fn load_with_config<T, C, K, R>(reader: &mut R, codec: &K, ctx: C, config: &PersistConfig) -> Result<BTree<T, C>>
where
    K: ItemCodec<T>,
    R: Read,
{
    let header = TreeHeader::read_from(reader)?;
    debug!(
        "Read tree header: degree {}, length {}, root: {}",
        header.degree, header.length, header.has_root
    );
    let degree = usize::try_from(header.degree)
        .map_err(|_| PersistError::InvalidHeader(format!("degree {} does not fit in memory", header.degree)))?;
    let length = usize::try_from(header.length)
        .map_err(|_| PersistError::InvalidHeader(format!("length {} does not fit in memory", header.length)))?;

    let root = if header.has_root {
        // One buffer per load; it is dropped with this call.
        let scratch = Vec::with_capacity(config.scratch_capacity);
        let (root, _scratch) = node_io::load_node(reader, scratch, codec, 1, config.max_depth)?;
        Some(root)
    } else {
        None
    };

    if log::log_enabled!(log::Level::Warn) {
        let decoded = root.as_ref().map_or(0, |r| r.subtree_len());
        if decoded != length {
            warn!("Tree header declares {} items but {} were decoded", length, decoded);
        }
    }

    let tree = BTree::from_parts(degree, length, root, ctx)?;
    debug!("Loaded tree of {} items", tree.length);
    Ok(tree)
}

/// Saves `tree` to a file at `path`, creating or truncating it, and flushes it.
pub fn save_to_path<T, C, K, P>(tree: &BTree<T, C>, path: P, codec: &K) -> Result<()>
where
    K: ItemCodec<T>,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref()).map_err(PersistError::IoWrite)?;
    let mut writer = BufWriter::new(file);
    save(tree, &mut writer, codec)?;
    writer.flush().map_err(PersistError::IoWrite)?;
    Ok(())
}

/// Loads a tree from the file at `path`.
pub fn load_from_path<T, C, K, P>(path: P, codec: &K, ctx: C) -> Result<BTree<T, C>>
where
    K: ItemCodec<T>,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref()).map_err(PersistError::IoRead)?;
    let mut reader = BufReader::new(file);
    load(&mut reader, codec, ctx)
}

impl<T, C> BTree<T, C> {
    /// Writes this tree to `writer`. See [`save`].
    pub fn save<K, W>(&self, writer: &mut W, codec: &K) -> Result<()>
    where
        K: ItemCodec<T>,
        W: Write,
    {
        save(self, writer, codec)
    }

    /// Reads a tree from `reader`. See [`load`].
    pub fn load<K, R>(reader: &mut R, codec: &K, ctx: C) -> Result<Self>
    where
        K: ItemCodec<T>,
        R: Read,
    {
        load(reader, codec, ctx)
    }
}
