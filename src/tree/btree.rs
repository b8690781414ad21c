// btree-persist/src/tree/btree.rs

use std::cmp::Ordering;
use std::mem;

use crate::common::Comparable;
use crate::error::{PersistError, Result};
use crate::node::{MAX_NODE_ITEMS, Node};

use super::cursor::Iter;

/// Largest degree whose full nodes (`2 * degree - 1` items) still fit the
/// 8-bit item count of the saved format.
pub const MAX_DEGREE: usize = (MAX_NODE_ITEMS + 1) / 2;

/// An in-memory B-tree ordered by `Comparable<C>` under the context `C`.
///
/// Nodes hold between `degree - 1` and `2 * degree - 1` items (the root may
/// hold fewer). The tree only supports insertion and lookup; persistence lives
/// in [`crate::store`].
#[derive(Debug, Clone)]
pub struct BTree<T, C = ()> {
    pub(crate) degree: usize,
    pub(crate) length: usize,
    pub(crate) root: Option<Node<T>>,
    pub(crate) ctx: C,
}

impl<T, C> BTree<T, C> {
    /// Creates an empty tree. Panics unless `2 <= degree <= MAX_DEGREE`.
    pub fn new(degree: usize, ctx: C) -> Self {
        match Self::try_new(degree, ctx) {
            Ok(tree) => tree,
            Err(e) => panic!("Invalid B-tree degree: {e}"),
        }
    }

    /// Creates an empty tree, rejecting a degree outside `2..=MAX_DEGREE`.
    pub fn try_new(degree: usize, ctx: C) -> Result<Self> {
        Self::from_parts(degree, 0, None, ctx)
    }

    /// Assembles a tree directly from its structure without rebalancing.
    ///
    /// `length` is taken as given; it is not recomputed from the nodes. The
    /// degree must lie in `2..=MAX_DEGREE`.
    pub fn from_parts(degree: usize, length: usize, root: Option<Node<T>>, ctx: C) -> Result<Self> {
        if !(2..=MAX_DEGREE).contains(&degree) {
            return Err(PersistError::InvalidHeader(format!(
                "degree must be between 2 and {MAX_DEGREE}, got {degree}"
            )));
        }
        Ok(BTree {
            degree,
            length,
            root,
            ctx,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_ref()
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Removes every item, keeping the degree and context.
    pub fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }

    /// Iterates over all items in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_ref())
    }

    fn max_items(&self) -> usize {
        self.degree * 2 - 1
    }
}

impl<T: Comparable<C>, C> BTree<T, C> {
    /// Looks up the stored item equal to `key`.
    pub fn get(&self, key: &T) -> Option<&T> {
        let mut node = self.root.as_ref()?;
        loop {
            match find(&node.items, key, &self.ctx) {
                Ok(i) => return Some(&node.items[i]),
                Err(i) => node = node.children.get(i)?,
            }
        }
    }

    /// Inserts `item`, returning the previous item that compared equal to it.
    pub fn replace_or_insert(&mut self, item: T) -> Option<T> {
        let max_items = self.max_items();
        let Some(root) = self.root.as_mut() else {
            self.root = Some(Node {
                items: vec![item],
                children: Vec::new(),
            });
            self.length += 1;
            return None;
        };

        if root.items.len() >= max_items {
            let mut left = mem::take(root);
            let (mid, right) = split(&mut left, max_items / 2);
            *root = Node {
                items: vec![mid],
                children: vec![left, right],
            };
        }

        let replaced = insert_into(root, item, max_items, &self.ctx);
        if replaced.is_none() {
            self.length += 1;
        }
        replaced
    }
}

fn find<T: Comparable<C>, C>(items: &[T], key: &T, ctx: &C) -> std::result::Result<usize, usize> {
    items.binary_search_by(|probe| probe.compare(key, ctx))
}

/// Splits `node` at item `i`: `node` keeps everything before it, the returned
/// node gets everything after it.
fn split<T>(node: &mut Node<T>, i: usize) -> (T, Node<T>) {
    let right_items = node.items.split_off(i + 1);
    let mid = node.items.remove(i);
    let right_children = if node.children.is_empty() {
        Vec::new()
    } else {
        node.children.split_off(i + 1)
    };
    (
        mid,
        Node {
            items: right_items,
            children: right_children,
        },
    )
}

// Full children are split on the way down so the parent always has room.
fn insert_into<T: Comparable<C>, C>(node: &mut Node<T>, item: T, max_items: usize, ctx: &C) -> Option<T> {
    let mut i = match find(&node.items, &item, ctx) {
        Ok(i) => return Some(mem::replace(&mut node.items[i], item)),
        Err(i) => i,
    };
    if node.children.is_empty() {
        node.items.insert(i, item);
        return None;
    }
    if node.children[i].items.len() >= max_items {
        let (mid, right) = split(&mut node.children[i], max_items / 2);
        node.items.insert(i, mid);
        node.children.insert(i + 1, right);
        match item.compare(&node.items[i], ctx) {
            Ordering::Less => {}
            Ordering::Greater => i += 1,
            Ordering::Equal => return Some(mem::replace(&mut node.items[i], item)),
        }
    }
    insert_into(&mut node.children[i], item, max_items, ctx)
}
