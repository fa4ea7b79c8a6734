//! Operators (ground actions) and their regular, relaxed and regressed
//! application semantics.

use crate::{Cost, PlanningError, State};

/// A conditional sub-effect of a compound operator.
///
/// A block fires iff its `conditions` are satisfied by the state as it stands
/// after the parent effect and every earlier sibling block have been applied.
/// Blocks carry no cost of their own: the whole operator is charged once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectBlock {
    conditions: State,
    add: State,
    delete: State,
}

impl EffectBlock {
    pub fn new(conditions: State, add: State, delete: State) -> Self {
        EffectBlock { conditions, add, delete }
    }
    pub fn conditions(&self) -> &State {
        &self.conditions
    }
    pub fn add_effects(&self) -> &State {
        &self.add
    }
    pub fn delete_effects(&self) -> &State {
        &self.delete
    }
}

/// An immutable, named and costed transformation of states.
///
/// An operator is *atomic* when it has no sub-effects, *compound* otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    name: String,
    cost: Cost,
    preconditions: State,
    add_effects: State,
    delete_effects: State,
    sub_effects: Vec<EffectBlock>,
}

/// new = (old AND NOT delete) OR add, evaluated against the old values so
/// that a proposition both added and deleted ends up true.
fn update(state: &mut State, add: &State, delete: &State) {
    let words = state.words_mut();
    for (i, w) in words.iter_mut().enumerate() {
        *w = (*w & !delete.words()[i]) | add.words()[i];
    }
}

impl Operator {
    pub fn new(
        name: impl Into<String>,
        cost: u64,
        preconditions: State,
        add_effects: State,
        delete_effects: State,
    ) -> Self {
        Operator {
            name: name.into(),
            cost: Cost::new(cost),
            preconditions,
            add_effects,
            delete_effects,
            sub_effects: vec![],
        }
    }
    /// Appends a conditional sub-effect, making this a compound operator.
    pub fn with_sub_effect(mut self, block: EffectBlock) -> Self {
        self.sub_effects.push(block);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn cost(&self) -> Cost {
        self.cost
    }
    pub fn preconditions(&self) -> &State {
        &self.preconditions
    }
    pub fn add_effects(&self) -> &State {
        &self.add_effects
    }
    pub fn delete_effects(&self) -> &State {
        &self.delete_effects
    }
    pub fn sub_effects(&self) -> &[EffectBlock] {
        &self.sub_effects
    }
    pub fn is_compound(&self) -> bool {
        !self.sub_effects.is_empty()
    }
    pub fn is_applicable(&self, state: &State) -> bool {
        state.satisfies(&self.preconditions)
    }

    /// Applies the operator to `state`. When the preconditions do not hold,
    /// the state is returned unchanged: callers enumerating successors are
    /// responsible for filtering inapplicable operators (see `try_apply`).
    pub fn apply(&self, state: &State) -> State {
        self.try_apply(state).unwrap_or_else(|| state.clone())
    }
    /// Applies the operator to `state`, or returns None when its
    /// preconditions are not satisfied.
    pub fn try_apply(&self, state: &State) -> Option<State> {
        if !self.is_applicable(state) {
            return None;
        }
        let mut next = state.clone();
        update(&mut next, &self.add_effects, &self.delete_effects);
        for block in self.sub_effects.iter() {
            if next.satisfies(&block.conditions) {
                update(&mut next, &block.add, &block.delete);
            }
        }
        Some(next)
    }
    /// Delete-relaxed application: delete effects are ignored so the result
    /// always dominates `state`. Returns `state` unchanged when the
    /// preconditions do not hold.
    pub fn apply_relaxed(&self, state: &State) -> State {
        let mut next = state.clone();
        if !self.is_applicable(state) {
            return next;
        }
        next.union_with(&self.add_effects);
        for block in self.sub_effects.iter() {
            if next.satisfies(&block.conditions) {
                next.union_with(&block.add);
            }
        }
        next
    }
    /// Relaxed regression: given the propositions `required` after the
    /// operator fires, computes the propositions that must hold before it.
    ///
    /// Whatever the operator adds itself is supplied without condition.
    /// Sub-effects are then regressed last-to-first. A block is only
    /// regressed through when it adds something still required; its
    /// conditions then become required, except those added by the operator
    /// itself. Finally the preconditions are required.
    pub fn inverse_relaxed(&self, required: &State) -> State {
        self.regress(required, |_| true)
    }
    /// Same as `inverse_relaxed`, but only regresses through the blocks
    /// that fire when the operator is applied (relaxed) to `state`.
    pub fn inverse_relaxed_from(&self, state: &State, required: &State) -> State {
        let fired = self.relaxed_firings(state);
        self.regress(required, |i| fired[i])
    }

    /// For each sub-effect block, whether it fires during the relaxed
    /// application to `state`.
    fn relaxed_firings(&self, state: &State) -> Vec<bool> {
        let mut fired = vec![false; self.sub_effects.len()];
        if !self.is_applicable(state) {
            return fired;
        }
        let mut next = state.clone();
        next.union_with(&self.add_effects);
        for (i, block) in self.sub_effects.iter().enumerate() {
            if next.satisfies(&block.conditions) {
                next.union_with(&block.add);
                fired[i] = true;
            }
        }
        fired
    }

    fn regress(&self, required: &State, may_fire: impl Fn(usize) -> bool) -> State {
        let mut before = required.clone();
        before.difference_with(&self.add_effects);
        for (i, block) in self.sub_effects.iter().enumerate().rev() {
            if may_fire(i) && before.intersects(&block.add) {
                before.difference_with(&block.add);
                before.union_with(&block.conditions);
                before.difference_with(&self.add_effects);
            }
        }
        before.union_with(&self.preconditions);
        before
    }

    /// Checks that every bit vector of this operator spans exactly
    /// `nb_props` propositions and that its cost is finite.
    pub fn validate(&self, nb_props: usize) -> Result<(), PlanningError> {
        if !self.cost.is_finite() {
            return Err(PlanningError::InfiniteCost(self.name.clone()));
        }
        let fields = [
            ("preconditions", &self.preconditions),
            ("add effects", &self.add_effects),
            ("delete effects", &self.delete_effects),
        ];
        let blocks = self.sub_effects.iter().flat_map(|b| {
            [
                ("sub-effect conditions", &b.conditions),
                ("sub-effect add effects", &b.add),
                ("sub-effect delete effects", &b.delete),
            ]
        });
        for (field, bits) in fields.into_iter().chain(blocks) {
            if bits.nb_propositions() != nb_props {
                return Err(PlanningError::DimensionMismatch {
                    operator: self.name.clone(),
                    field,
                    expected: nb_props,
                    found: bits.nb_propositions(),
                });
            }
        }
        Ok(())
    }
}
