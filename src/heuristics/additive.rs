//! The additive (HSP) reachability heuristic.
//!
//! Under delete relaxation, the cost of a proposition is the cheapest
//! enabling cost of an operator adding it, where the enabling cost of an
//! operator is the *sum* of the costs of its preconditions plus its own cost.
//! Summing assumes sub-goals are independent, so shared sub-plans are counted
//! several times: the estimate is informative but **not admissible**. Plans
//! found with it are not guaranteed to be optimal.

use crate::{Cost, Heuristic, Operator, State};

#[derive(Debug, Clone, Copy, Default)]
pub struct Additive;

fn sum_over(costs: &[Cost], props: &State) -> Cost {
    props.iter().map(|p| costs[p]).sum()
}

/// Lowers the cost of every proposition in `props` to `cost`. Returns true
/// iff at least one proposition got cheaper.
fn lower(costs: &mut [Cost], props: &State, cost: Cost) -> bool {
    let mut changed = false;
    for p in props.iter() {
        if cost < costs[p] {
            costs[p] = cost;
            changed = true;
        }
    }
    changed
}

impl Additive {
    /// Computes, for every proposition, the additive cost of making it true
    /// from `state`. Unreachable propositions cost `Cost::INFINITY`.
    ///
    /// The loop reaches a fixed point because costs only ever decrease and
    /// are bounded below by zero.
    pub fn proposition_costs(&self, operators: &[Operator], state: &State) -> Vec<Cost> {
        let mut costs = (0..state.nb_propositions())
            .map(|p| if state.get(p) { Cost::ZERO } else { Cost::INFINITY })
            .collect::<Vec<_>>();

        let mut changed = true;
        while changed {
            changed = false;
            for op in operators {
                let enabling = sum_over(&costs, op.preconditions()) + op.cost();
                if !enabling.is_finite() {
                    continue;
                }
                changed |= lower(&mut costs, op.add_effects(), enabling);
                for block in op.sub_effects() {
                    // conditions the operator adds itself come for free
                    let mut conditions = block.conditions().clone();
                    conditions.difference_with(op.add_effects());
                    let block_cost = enabling + sum_over(&costs, &conditions);
                    if block_cost.is_finite() {
                        changed |= lower(&mut costs, block.add_effects(), block_cost);
                    }
                }
            }
        }
        costs
    }
}

impl Heuristic for Additive {
    fn estimate(&self, operators: &[Operator], state: &State, goal: &State) -> Cost {
        let costs = self.proposition_costs(operators, state);
        sum_over(&costs, goal)
    }
}
