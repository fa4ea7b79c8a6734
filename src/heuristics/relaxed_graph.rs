//! The relaxed planning graph (FF) heuristic.
//!
//! A delete-relaxed forward expansion records the layer at which every
//! proposition and operator first becomes reachable. A relaxed plan is then
//! extracted backward from the goal layer, and its cost (each operator
//! counted once) is the estimate. Like the additive heuristic, this estimate
//! is **not admissible**.

use crate::{Cost, Heuristic, Operator, State};

/// Level of a proposition or operator that is never reached.
const UNREACHED: usize = usize::MAX;

#[derive(Debug, Clone, Copy, Default)]
pub struct RelaxedGraph;

/// The layered structure built by the forward expansion.
#[derive(Debug, Clone)]
pub struct PlanningGraph {
    /// layers[0] is the query state; the last layer satisfies the goal
    layers: Vec<State>,
    /// The first layer in which each proposition holds
    prop_level: Vec<usize>,
    /// The first layer in which each operator is enabled
    op_level: Vec<usize>,
    /// For each layer i (but the last): the operators enabled in layer i
    /// together with the relaxed state they produce from layer i
    supports: Vec<Vec<(usize, State)>>,
}

impl PlanningGraph {
    /// Expands the relaxed planning graph from `state` until `goal` is
    /// satisfied. Returns None when a fixed point is hit first, meaning the
    /// goal is unreachable even ignoring delete effects.
    pub fn expand(operators: &[Operator], state: &State, goal: &State) -> Option<Self> {
        let mut prop_level = vec![UNREACHED; state.nb_propositions()];
        for p in state.iter() {
            prop_level[p] = 0;
        }
        let mut op_level = vec![UNREACHED; operators.len()];
        let mut layers = vec![state.clone()];
        let mut supports = vec![];

        loop {
            let depth = layers.len() - 1;
            let current = &layers[depth];
            if current.satisfies(goal) {
                break;
            }

            let mut next = current.clone();
            let mut enabled = vec![];
            for (o, op) in operators.iter().enumerate() {
                if op.is_applicable(current) {
                    if op_level[o] == UNREACHED {
                        op_level[o] = depth;
                    }
                    let reached = op.apply_relaxed(current);
                    next.union_with(&reached);
                    enabled.push((o, reached));
                }
            }
            if next == *current {
                return None;
            }
            for p in next.iter() {
                if prop_level[p] == UNREACHED {
                    prop_level[p] = depth + 1;
                }
            }
            supports.push(enabled);
            layers.push(next);
        }

        Some(PlanningGraph { layers, prop_level, op_level, supports })
    }

    /// The number of the layer satisfying the goal (0 if the query state
    /// already does).
    pub fn goal_layer(&self) -> usize {
        self.layers.len() - 1
    }
    pub fn layer(&self, i: usize) -> &State {
        &self.layers[i]
    }
    /// The first layer in which `p` holds, if any.
    pub fn proposition_level(&self, p: usize) -> Option<usize> {
        Some(self.prop_level[p]).filter(|l| *l != UNREACHED)
    }
    /// The first layer in which operator `o` is enabled, if any.
    pub fn operator_level(&self, o: usize) -> Option<usize> {
        Some(self.op_level[o]).filter(|l| *l != UNREACHED)
    }

    fn precondition_level(&self, op: &Operator) -> usize {
        op.preconditions().iter().map(|p| self.prop_level[p]).sum()
    }

    /// Extracts a relaxed plan supporting `goal` and returns its operators,
    /// in no particular order, along with its cost.
    ///
    /// Walking from the goal layer down to layer 1, every needed proposition
    /// which already holds one layer earlier is simply pushed down. Any other
    /// needed proposition that is not yet supported at this layer gets the
    /// enabled operator producing it with the lowest level (ties broken by
    /// lowest sum of precondition levels, then by operator index). The
    /// regression of the chosen operator, through the sub-effects that fire
    /// from the previous layer only, becomes needed one layer down. It thus
    /// always holds in that layer.
    pub fn extract(&self, operators: &[Operator], goal: &State) -> (Vec<usize>, Cost) {
        let nb_props = goal.nb_propositions();
        let top = self.goal_layer();

        let mut needed = vec![State::new(nb_props); top + 1];
        needed[top] = goal.clone();

        let mut chosen = vec![false; operators.len()];
        let mut plan = vec![];
        let mut cost = Cost::ZERO;

        for t in (1..=top).rev() {
            let previous = &self.layers[t - 1];
            let goals = std::mem::replace(&mut needed[t], State::new(nb_props));
            let mut supported = State::new(nb_props);
            let mut below = State::new(nb_props);

            for p in goals.iter() {
                if previous.get(p) {
                    below.set(p, true);
                    continue;
                }
                if supported.get(p) {
                    continue;
                }
                let best = self.supports[t - 1]
                    .iter()
                    .filter(|(_, reached)| reached.get(p))
                    .min_by_key(|(o, _)| (self.op_level[*o], self.precondition_level(&operators[*o]), *o));
                // p first holds in some layer <= t, so an enabled operator produces it
                let Some((o, reached)) = best else {
                    return (plan, Cost::INFINITY);
                };

                if !chosen[*o] {
                    chosen[*o] = true;
                    plan.push(*o);
                    cost += operators[*o].cost();
                }

                // everything this operator newly makes true and we need here
                let mut achieved = reached.clone();
                achieved.difference_with(previous);
                achieved.intersect_with(&goals);
                supported.union_with(&achieved);
                below.union_with(&operators[*o].inverse_relaxed_from(previous, &achieved));
            }
            needed[t - 1].union_with(&below);
        }
        (plan, cost)
    }
}

impl Heuristic for RelaxedGraph {
    fn estimate(&self, operators: &[Operator], state: &State, goal: &State) -> Cost {
        match PlanningGraph::expand(operators, state, goal) {
            Some(graph) => graph.extract(operators, goal).1,
            None => Cost::INFINITY,
        }
    }
}
