// btree-persist/src/store/node_io.rs

use log::trace;
use std::io::{Read, Write};

use super::format::NodeHeader;
use crate::codec::ItemCodec;
use crate::error::{PersistError, Result};
use crate::node::Node;

/// Writes `node` and its whole subtree in pre-order.
///
/// Uses the same depth bound as [`load_node`], so nothing is written that the
/// matching load would refuse.
pub(crate) fn save_node<T, K, W>(writer: &mut W, node: &Node<T>, codec: &K, depth: usize, max_depth: usize) -> Result<()>
where
    K: ItemCodec<T>,
    W: Write,
{
    if depth > max_depth {
        return Err(PersistError::TooDeep { max_depth });
    }

    let header = NodeHeader::for_node(node)?;
    trace!(
        "Writing node at depth {}: {} items, children: {}",
        depth, header.item_count, header.has_children
    );
    header.write_to(writer)?;

    for item in node.items() {
        codec
            .encode_item(writer, item)
            .map_err(|e| PersistError::ItemEncode(Box::new(e)))?;
    }
    for child in node.children() {
        save_node(writer, child, codec, depth + 1, max_depth)?;
    }
    Ok(())
}

/// Reads one subtree, threading `scratch` through every item and child decode.
///
/// `depth` is 1 for the root. Returns the node together with the scratch
/// buffer so the caller can pass it on to the next sibling.
pub(crate) fn load_node<T, K, R>(
    reader: &mut R,
    scratch: Vec<u8>,
    codec: &K,
    depth: usize,
    max_depth: usize,
) -> Result<(Node<T>, Vec<u8>)>
where
    K: ItemCodec<T>,
    R: Read,
{
    if depth > max_depth {
        return Err(PersistError::TooDeep { max_depth });
    }

    let header = NodeHeader::read_from(reader)?;
    let item_count = usize::from(header.item_count);
    trace!(
        "Read node at depth {}: {} items, children: {}",
        depth, item_count, header.has_children
    );

    let mut buf = scratch;
    let mut items = Vec::with_capacity(item_count);
    for _ in 0..item_count {
        let (item, next) = codec
            .decode_item(reader, buf)
            .map_err(|e| PersistError::ItemDecode(Box::new(e)))?;
        items.push(item);
        buf = next;
    }

    let mut children = Vec::new();
    if header.has_children {
        children.reserve_exact(item_count + 1);
        for _ in 0..=item_count {
            let (child, next) = load_node(reader, buf, codec, depth + 1, max_depth)?;
            children.push(child);
            buf = next;
        }
    }

    Ok((Node { items, children }, buf))
}
