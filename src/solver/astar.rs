use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    Cost, Frontier, Heuristic, Node, OperatorId, Plan, PlanResult, PlanningError, Problem,
    SimpleFrontier, State, StateArena,
};

/// A successor produced by the expansion of one state.
#[derive(Debug)]
struct Successor {
    op: OperatorId,
    state: State,
    /// The heuristic value, when it was computed ahead of the merge
    h: Option<Cost>,
}

/// Best-first search ordered by f = g + h.
///
/// The engine is complete for any finite non-negative heuristic and returns a
/// cost-optimal plan whenever the heuristic is admissible. With the `Zero`
/// heuristic it degenerates into uniform-cost search.
///
/// When configured with more than one thread, the successors of every
/// expanded state are generated and evaluated in parallel. Each worker owns
/// its successor states and only reads the state arena; all updates to the
/// arena and to the frontier are merged afterwards by a single writer, in
/// operator order, so parallel and sequential runs behave identically.
pub struct AStar<'a, H>
where
    H: Heuristic + Send + Sync,
{
    problem: &'a Problem,
    heuristic: &'a H,
    /// The number of threads used to evaluate successors
    nb_threads: usize,
    /// The number of states expanded by the last search
    explored: usize,
    /// The number of distinct states generated by the last search
    generated: usize,
}

impl<'a, H> AStar<'a, H>
where
    H: Heuristic + Send + Sync,
{
    pub fn new(problem: &'a Problem, heuristic: &'a H) -> Self {
        Self::custom(problem, heuristic, 1)
    }
    pub fn custom(problem: &'a Problem, heuristic: &'a H, nb_threads: usize) -> Self {
        AStar {
            problem,
            heuristic,
            nb_threads: nb_threads.max(1),
            explored: 0,
            generated: 0,
        }
    }
    /// Sets the number of threads used to evaluate successors
    pub fn with_nb_threads(mut self, nb_threads: usize) -> Self {
        self.nb_threads = nb_threads.max(1);
        self
    }

    pub fn get_explored(&self) -> usize {
        self.explored
    }
    pub fn get_generated(&self) -> usize {
        self.generated
    }

    /// Searches for a plan from `start` to a state satisfying `goal` using a
    /// `SimpleFrontier`.
    pub fn search(&mut self, start: &State, goal: &State) -> Result<PlanResult, PlanningError> {
        let mut frontier = SimpleFrontier::new();
        self.search_with(&mut frontier, start, goal)
    }

    /// Searches for a plan from `start` to a state satisfying `goal`, using
    /// the given frontier as open list. The frontier is cleared first.
    pub fn search_with<F>(
        &mut self,
        frontier: &mut F,
        start: &State,
        goal: &State,
    ) -> Result<PlanResult, PlanningError>
    where
        F: Frontier,
    {
        self.problem.check_dimension("start", start)?;
        self.problem.check_dimension("goal", goal)?;

        frontier.clear();
        self.explored = 0;
        self.generated = 1;

        let operators = self.problem.operators();
        let mut arena = StateArena::new();
        let h = self.heuristic.estimate(operators, start, goal);
        let root = arena.insert(start.clone(), h);
        arena.data_mut(root).g = Cost::ZERO;

        debug!(
            nb_propositions = self.problem.nb_propositions(),
            nb_operators = operators.len(),
            nb_threads = self.nb_threads,
            h = %h,
            "starting search"
        );

        let mut seq = 0;
        if h.is_finite() || start.satisfies(goal) {
            frontier.push(Node { state: root, g: Cost::ZERO, f: h, seq });
            seq += 1;
        }

        while let Some(node) = frontier.pop() {
            // a cheaper path was found after this entry was queued
            if node.g > arena.data(node.state).g {
                continue;
            }

            let current = arena.state(node.state).clone();
            if current.satisfies(goal) {
                let plan = Plan {
                    steps: arena.path_to(node.state),
                    cost: node.g,
                };
                debug!(
                    cost = %plan.cost,
                    length = plan.len(),
                    explored = self.explored,
                    generated = self.generated,
                    "plan found"
                );
                return Ok(PlanResult::Found(plan));
            }

            self.explored += 1;
            trace!(state = %current, g = %node.g, f = %node.f, open = frontier.len(), "expanding");

            let successors = if self.nb_threads > 1 {
                self.evaluate_parallel(&arena, &current, goal)
            } else {
                self.evaluate(&current)
            };
            for successor in successors {
                self.merge(&mut arena, frontier, &mut seq, node, successor, goal);
            }
        }

        debug!(explored = self.explored, generated = self.generated, "search space exhausted");
        Ok(PlanResult::NotFound)
    }

    /// The states reachable from `current` in one step. Inapplicable
    /// operators and self loops are filtered out.
    fn evaluate(&self, current: &State) -> Vec<Successor> {
        self.problem
            .operators()
            .iter()
            .enumerate()
            .filter_map(|(i, op)| {
                let next = op.try_apply(current)?;
                (next != *current).then_some(Successor { op: OperatorId(i), state: next, h: None })
            })
            .collect()
    }

    /// Same as `evaluate`, but splits the operators among the worker threads
    /// which also compute the heuristic value of the successors the arena
    /// does not know yet. The result is sorted by operator.
    fn evaluate_parallel(&self, arena: &StateArena, current: &State, goal: &State) -> Vec<Successor> {
        let operators = self.problem.operators();
        if operators.is_empty() {
            return vec![];
        }
        let chunk = (operators.len() + self.nb_threads - 1) / self.nb_threads;
        let collected = Mutex::new(Vec::with_capacity(operators.len()));

        std::thread::scope(|s| {
            for (k, slice) in operators.chunks(chunk).enumerate() {
                let collected = &collected;
                s.spawn(move || {
                    let mut local = vec![];
                    for (i, op) in slice.iter().enumerate() {
                        let Some(next) = op.try_apply(current) else {
                            continue;
                        };
                        if next == *current {
                            continue;
                        }
                        let h = match arena.lookup(&next) {
                            Some(_) => None,
                            None => Some(self.heuristic.estimate(operators, &next, goal)),
                        };
                        local.push(Successor { op: OperatorId(k * chunk + i), state: next, h });
                    }
                    collected.lock().extend(local);
                });
            }
        });

        let mut successors = collected.into_inner();
        successors.sort_unstable_by_key(|s| s.op);
        successors
    }

    /// Records `successor`, reached from `parent`, in the arena and queues it
    /// whenever its best known path got cheaper. Dead ends (infinite h) are
    /// recorded but never queued.
    fn merge<F: Frontier>(
        &mut self,
        arena: &mut StateArena,
        frontier: &mut F,
        seq: &mut usize,
        parent: Node,
        successor: Successor,
        goal: &State,
    ) {
        let Successor { op, state, h } = successor;
        let id = match arena.lookup(&state) {
            Some(id) => id,
            None => {
                let h = h.unwrap_or_else(|| self.heuristic.estimate(self.problem.operators(), &state, goal));
                self.generated += 1;
                arena.insert(state, h)
            }
        };

        let g = parent.g + self.problem.operator(op).cost();
        let data = arena.data_mut(id);
        if g < data.g {
            data.g = g;
            data.parent = Some((parent.state, op));
            if data.h.is_finite() {
                frontier.push(Node { state: id, g, f: g + data.h, seq: *seq });
                *seq += 1;
            }
        }
    }
}
