use crate::{Frontier, Node};
use binary_heap_plus::BinaryHeap;

use super::MinF;

/// A plain priority queue. The same state may be queued several times with
/// different g values: the search discards the outdated copies when they
/// are popped.
pub struct SimpleFrontier {
    heap: BinaryHeap<Node, MinF>,
}
impl SimpleFrontier {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::from_vec_cmp(vec![], MinF),
        }
    }
}
impl Default for SimpleFrontier {
    fn default() -> Self {
        Self::new()
    }
}
impl Frontier for SimpleFrontier {
    fn push(&mut self, node: Node) {
        self.heap.push(node)
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop()
    }

    fn clear(&mut self) {
        self.heap.clear()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
