use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Cost, OperatorId, State, StateId};

/// What the search knows about a visited state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateData {
    /// The cost of the best known path from the start
    pub g: Cost,
    /// The heuristic estimate, computed once when the state is first seen
    pub h: Cost,
    /// The predecessor on the best known path and the operator leading here
    pub parent: Option<(StateId, OperatorId)>,
}

/// Interns every distinct state seen by one search invocation under a
/// stable `StateId`, and stores its `StateData`. Entries are never removed,
/// so ids held by the frontier stay valid while the arena grows.
#[derive(Debug, Default)]
pub struct StateArena {
    ids: FxHashMap<Arc<State>, StateId>,
    states: Vec<Arc<State>>,
    data: Vec<StateData>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.states.len()
    }
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
    pub fn lookup(&self, state: &State) -> Option<StateId> {
        self.ids.get(state).copied()
    }
    /// Records a state that was never seen before, with an infinite g.
    ///
    /// # Panics
    /// In debug builds, when `state` is already interned.
    pub fn insert(&mut self, state: State, h: Cost) -> StateId {
        debug_assert!(self.lookup(&state).is_none());
        let id = StateId(self.states.len());
        let state = Arc::new(state);
        self.ids.insert(Arc::clone(&state), id);
        self.states.push(state);
        self.data.push(StateData {
            g: Cost::INFINITY,
            h,
            parent: None,
        });
        id
    }
    pub fn state(&self, id: StateId) -> &Arc<State> {
        &self.states[id.id()]
    }
    pub fn data(&self, id: StateId) -> &StateData {
        &self.data[id.id()]
    }
    pub fn data_mut(&mut self, id: StateId) -> &mut StateData {
        &mut self.data[id.id()]
    }
    /// Follows the predecessor links from `id` back to a state without
    /// predecessor and returns the operators met, in execution order.
    pub fn path_to(&self, id: StateId) -> Vec<OperatorId> {
        let mut path = vec![];
        let mut current = id;
        while let Some((parent, op)) = self.data(current).parent {
            path.push(op);
            current = parent;
        }
        path.reverse();
        path
    }
}
