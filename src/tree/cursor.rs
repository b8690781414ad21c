// btree-persist/src/tree/cursor.rs

use crate::node::Node;

/// In-order iterator over the items of a tree.
///
/// Each stack frame is a node plus the index of the next item to yield from it.
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<(&'a Node<T>, usize)>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Iter { stack: Vec::new() };
        if let Some(node) = root {
            iter.push_left_spine(node);
        }
        iter
    }

    fn push_left_spine(&mut self, mut node: &'a Node<T>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            let top = self.stack.last_mut()?;
            let node: &'a Node<T> = top.0;
            let idx = top.1;
            if idx < node.items.len() {
                top.1 += 1;
                if let Some(child) = node.children.get(idx + 1) {
                    self.push_left_spine(child);
                }
                return Some(&node.items[idx]);
            }
            self.stack.pop();
        }
    }
}
