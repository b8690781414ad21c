// btree-persist/src/node/definition.rs

use crate::error::{PersistError, Result};

/// Largest item count a single node can carry on the wire (the count is a `u8`).
pub const MAX_NODE_ITEMS: usize = u8::MAX as usize;

/// A node of the B-tree.
///
/// A node is either a leaf (no children) or internal with exactly
/// `items.len() + 1` children. All items of `children[i]` sort before
/// `items[i]`, and all items of `children[i + 1]` sort after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub(crate) items: Vec<T>,
    pub(crate) children: Vec<Node<T>>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::new_leaf()
    }
}

impl<T> Node<T> {
    /// Creates a new, empty leaf node.
    pub fn new_leaf() -> Self {
        Node {
            items: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builds a node from its items and children, checking the child-count invariant.
    pub fn from_parts(items: Vec<T>, children: Vec<Node<T>>) -> Result<Self> {
        if !children.is_empty() && children.len() != items.len() + 1 {
            return Err(PersistError::InvalidNode(format!(
                "{} items require 0 or {} children, got {}",
                items.len(),
                items.len() + 1,
                children.len()
            )));
        }
        Ok(Node { items, children })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Consumes the node, returning its items and children.
    pub fn into_parts(self) -> (Vec<T>, Vec<Node<T>>) {
        (self.items, self.children)
    }

    /// Number of items stored in this subtree.
    pub fn subtree_len(&self) -> usize {
        self.items.len() + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }

    /// Number of levels below and including this node.
    pub fn height(&self) -> usize {
        1 + self.children.first().map_or(0, Node::height)
    }
}
