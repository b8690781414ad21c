// btree-persist/src/store/format.rs

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use crate::error::{PersistError, Result};
use crate::node::{MAX_NODE_ITEMS, Node};

// --- Structures ---

/// Tree-level metadata written ahead of the root node.
///
/// Layout: `u64` degree, `u64` item count, `u8` root flag, all big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeHeader {
    pub degree: u64,
    pub length: u64,
    pub has_root: bool,
}

impl TreeHeader {
    pub const SIZE: usize = 8 + 8 + 1;

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u64::<BigEndian>(self.degree).map_err(PersistError::IoWrite)?;
        writer.write_u64::<BigEndian>(self.length).map_err(PersistError::IoWrite)?;
        writer.write_u8(u8::from(self.has_root)).map_err(PersistError::IoWrite)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let degree = reader.read_u64::<BigEndian>().map_err(PersistError::IoRead)?;
        let length = reader.read_u64::<BigEndian>().map_err(PersistError::IoRead)?;
        let has_root = reader.read_u8().map_err(PersistError::IoRead)? != 0;
        Ok(Self {
            degree,
            length,
            has_root,
        })
    }
}

/// Per-node prefix: item count and whether child subtrees follow.
///
/// There is no subtree length; a reader tracks structure from these two fields alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeader {
    pub item_count: u8,
    pub has_children: bool,
}

impl NodeHeader {
    pub const SIZE: usize = 1 + 1;

    /// Describes `node`, failing if its item count does not fit the `u8` field.
    pub fn for_node<T>(node: &Node<T>) -> Result<Self> {
        let items = node.items().len();
        if items > MAX_NODE_ITEMS {
            return Err(PersistError::NodeTooLarge { items });
        }
        Ok(Self {
            item_count: items as u8,
            has_children: !node.is_leaf(),
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(self.item_count).map_err(PersistError::IoWrite)?;
        writer.write_u8(u8::from(self.has_children)).map_err(PersistError::IoWrite)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let item_count = reader.read_u8().map_err(PersistError::IoRead)?;
        let has_children = reader.read_u8().map_err(PersistError::IoRead)? != 0;
        Ok(Self {
            item_count,
            has_children,
        })
    }
}
