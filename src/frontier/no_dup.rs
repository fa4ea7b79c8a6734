use compare::Compare;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::cmp::Ordering::{Greater, Less};
use std::collections::hash_map::Entry::{Occupied, Vacant};

use crate::{Frontier, Node, StateId};

use self::Action::{BubbleDown, BubbleUp, DoNothing};

use super::MinF;

/// This is a type-safe identifier for some node in the queue.
/// Basically, this NodeId equates to the position of the identified
/// node in the `nodes` list from the `NoDupFrontier`.
#[derive(Debug, Copy, Clone)]
struct NodeId(usize);

/// An enum to know what needs to be done with a given node id
#[derive(Debug, Copy, Clone)]
enum Action {
    DoNothing,
    BubbleUp(NodeId),
    BubbleDown(NodeId),
}

/// This is an updatable binary heap backed by a vector which guarantees
/// that a given state is only ever present *ONCE* in the priority queue.
/// Pushing a better entry for a state that is already queued replaces the
/// queued entry in place (decrease-key), so this frontier never yields
/// outdated entries.
pub struct NoDupFrontier {
    /// This is the comparator used to order the nodes in the binary heap
    cmp: MinF,
    /// A mapping that associates some state to a node identifier.
    states: FxHashMap<StateId, NodeId>,
    /// The actual payload (nodes) ordered in the list
    nodes: Vec<Node>,
    /// The position of the items in the heap
    pos: Vec<usize>,
    /// This is the actual heap which orders nodes.
    heap: Vec<NodeId>,
    /// The positions in the `nodes` vector that can be recycled.
    recycle_bin: Vec<NodeId>,
}

impl Frontier for NoDupFrontier {
    /// Pushes one node onto the heap while ensuring that only one copy of the
    /// node (identified by its state) is kept in the heap.
    ///
    /// # Note:
    /// When the heap already holds an entry for the same state, the entry
    /// that pops first (lowest f, then earliest insertion) is kept.
    fn push(&mut self, node: Node) {
        let action = match self.states.entry(node.state) {
            Occupied(e) => {
                let id = *e.get();
                if self.cmp.compare(&node, &self.nodes[id.0]) == Greater {
                    self.nodes[id.0] = node;
                    BubbleUp(id)
                } else {
                    DoNothing
                }
            }
            Vacant(e) => {
                let id = match self.recycle_bin.pop() {
                    Some(id) => {
                        self.nodes[id.0] = node;
                        id
                    }
                    None => {
                        let id = NodeId(self.nodes.len());
                        self.nodes.push(node);
                        self.pos.push(0); // dummy
                        id
                    }
                };

                self.heap.push(id);
                self.pos[id.0] = self.heap.len() - 1;
                e.insert(id);
                BubbleUp(id)
            }
        };

        // restore the invariants
        self.process_action(action);
    }

    /// Pops the best node out of the heap.
    fn pop(&mut self) -> Option<Node> {
        if self.heap.is_empty() {
            return None;
        }

        let id = self.heap.swap_remove(0);
        let action = if self.heap.is_empty() {
            DoNothing
        } else {
            self.pos[self.heap[0].0] = 0;
            BubbleDown(self.heap[0])
        };

        self.process_action(action);
        self.recycle_bin.push(id);

        let node = self.nodes[id.0];
        self.states.remove(&node.state);

        Some(node)
    }

    /// Clears the content of the heap to reset it to a state equivalent to
    /// a fresh instantiation of the heap.
    fn clear(&mut self) {
        self.states.clear();
        self.nodes.clear();
        self.pos.clear();
        self.heap.clear();
        self.recycle_bin.clear();
    }

    /// Returns the 'length' of the heap. That is, the number of items that
    /// can still be popped out of the heap.
    fn len(&self) -> usize {
        self.heap.len()
    }
}

impl Default for NoDupFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl NoDupFrontier {
    pub fn new() -> Self {
        Self {
            cmp: MinF,
            states: Default::default(),
            nodes: vec![],
            pos: vec![],
            heap: vec![],
            recycle_bin: vec![],
        }
    }

    /// Returns true iff some entry for `state` is queued.
    pub fn contains(&self, state: StateId) -> bool {
        self.states.contains_key(&state)
    }

    fn process_action(&mut self, action: Action) {
        match action {
            BubbleUp(id) => self.bubble_up(id),
            BubbleDown(id) => self.bubble_down(id),
            DoNothing => {}
        }
    }
    fn compare_at_pos(&self, x: usize, y: usize) -> Ordering {
        let node_x = &self.nodes[self.heap[x].0];
        let node_y = &self.nodes[self.heap[y].0];
        self.cmp.compare(node_x, node_y)
    }
    fn bubble_up(&mut self, id: NodeId) {
        let mut me = self.pos[id.0];

        while me > 0 {
            let parent = (me - 1) / 2;
            if self.compare_at_pos(me, parent) != Greater {
                break;
            }
            self.swap(me, parent);
            me = parent;
        }
    }
    fn bubble_down(&mut self, id: NodeId) {
        let mut me = self.pos[id.0];
        while let Some(kid) = self.max_child_of(me) {
            if self.compare_at_pos(me, kid) != Less {
                break;
            }
            self.swap(me, kid);
            me = kid;
        }
    }
    /// Exchanges the heap slots `a` and `b`, keeping `pos` in sync.
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.pos[self.heap[a].0] = a;
        self.pos[self.heap[b].0] = b;
    }
    /// The position of the child of `pos` that should pop first, or None
    /// when `pos` is a leaf.
    fn max_child_of(&self, pos: usize) -> Option<usize> {
        let size = self.len();
        let left = pos * 2 + 1;
        let right = pos * 2 + 2;

        if left >= size {
            return None;
        }
        if right >= size {
            return Some(left);
        }
        match self.compare_at_pos(left, right) {
            Greater => Some(left),
            _ => Some(right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cost;

    fn node(state: usize, f: u64, seq: usize) -> Node {
        Node { state: StateId(state), g: Cost::new(f), f: Cost::new(f), seq }
    }

    fn drain(frontier: &mut NoDupFrontier) -> Vec<(usize, usize)> {
        std::iter::from_fn(|| frontier.pop())
            .map(|n| (n.state.id(), n.seq))
            .collect()
    }

    #[test]
    fn keeps_a_single_entry_per_state() {
        let mut frontier = NoDupFrontier::new();
        frontier.push(node(0, 5, 0));
        frontier.push(node(1, 4, 1));
        frontier.push(node(0, 2, 2));
        frontier.push(node(1, 9, 3));
        assert_eq!(2, frontier.len());
        assert!(frontier.contains(StateId(0)));

        assert_eq!(vec![(0, 2), (1, 1)], drain(&mut frontier));
        assert!(!frontier.contains(StateId(0)));
    }

    #[test]
    fn pops_in_f_then_insertion_order() {
        let mut frontier = NoDupFrontier::new();
        let fs = [7, 3, 9, 3, 1, 8, 3, 2, 6, 1];
        for (i, f) in fs.iter().enumerate() {
            frontier.push(node(i, *f, i));
        }
        let order = drain(&mut frontier).into_iter().map(|(s, _)| s).collect::<Vec<_>>();
        assert_eq!(vec![4, 9, 7, 1, 3, 6, 8, 0, 5, 2], order);
    }

    #[test]
    fn slots_are_recycled_after_pop() {
        let mut frontier = NoDupFrontier::new();
        frontier.push(node(0, 1, 0));
        frontier.push(node(1, 2, 1));
        assert_eq!(Some(0), frontier.pop().map(|n| n.state.id()));
        // state 0 may be queued again once popped
        frontier.push(node(0, 3, 2));
        frontier.push(node(2, 0, 3));
        assert_eq!(vec![(2, 3), (1, 1), (0, 2)], drain(&mut frontier));

        frontier.push(node(5, 5, 4));
        frontier.clear();
        assert!(frontier.is_empty());
    }
}
