//! The planning problem: a proposition name table and the operators acting
//! on those propositions.

use rustc_hash::FxHashMap;

use crate::{AStar, Heuristic, Operator, OperatorId, PlanResult, PlanningError, State};

/// A validated, read-only planning problem.
#[derive(Debug, Clone)]
pub struct Problem {
    propositions: Vec<String>,
    index: FxHashMap<String, usize>,
    operators: Vec<Operator>,
}

impl Problem {
    /// Builds a problem after checking that proposition names are unique and
    /// that every operator spans exactly `propositions.len()` propositions.
    pub fn new<S>(propositions: Vec<S>, operators: Vec<Operator>) -> Result<Self, PlanningError>
    where
        S: Into<String>,
    {
        let propositions = propositions.into_iter().map(Into::into).collect::<Vec<String>>();
        let mut index = FxHashMap::default();
        for (i, name) in propositions.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(PlanningError::DuplicateProposition(name.clone()));
            }
        }
        for op in operators.iter() {
            op.validate(propositions.len())?;
        }
        Ok(Problem { propositions, index, operators })
    }

    pub fn nb_propositions(&self) -> usize {
        self.propositions.len()
    }
    pub fn propositions(&self) -> &[String] {
        &self.propositions
    }
    pub fn proposition_name(&self, p: usize) -> Option<&str> {
        self.propositions.get(p).map(String::as_str)
    }
    pub fn proposition_id(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }
    /// Returns the operator with the given id.
    ///
    /// # Panics
    /// When `id` does not denote an operator of this problem.
    pub fn operator(&self, id: OperatorId) -> &Operator {
        &self.operators[id.id()]
    }

    /// Builds the state in which exactly the named propositions hold.
    pub fn state(&self, true_props: &[&str]) -> Result<State, PlanningError> {
        let mut state = State::new(self.nb_propositions());
        for name in true_props {
            let p = self
                .proposition_id(name)
                .ok_or_else(|| PlanningError::UnknownProposition((*name).to_owned()))?;
            state.set(p, true);
        }
        Ok(state)
    }

    /// Checks that `state` spans this problem's propositions.
    pub fn check_dimension(&self, what: &'static str, state: &State) -> Result<(), PlanningError> {
        if state.nb_propositions() != self.nb_propositions() {
            return Err(PlanningError::StateDimension {
                what,
                expected: self.nb_propositions(),
                found: state.nb_propositions(),
            });
        }
        Ok(())
    }

    /// Runs a single-threaded A* search from `start` to any state satisfying
    /// `goal`, guided by `heuristic`.
    pub fn search<H>(&self, heuristic: &H, start: &State, goal: &State) -> Result<PlanResult, PlanningError>
    where
        H: Heuristic + Send + Sync,
    {
        AStar::new(self, heuristic).search(start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_to_states() {
        let problem = Problem::new(vec!["A", "B", "C"], vec![]).unwrap();
        assert_eq!(3, problem.nb_propositions());
        assert_eq!(Some(1), problem.proposition_id("B"));
        assert_eq!(Some("C"), problem.proposition_name(2));
        assert_eq!(State::with_true(3, [0, 2]), problem.state(&["A", "C"]).unwrap());
        assert!(matches!(
            problem.state(&["D"]),
            Err(PlanningError::UnknownProposition(name)) if name == "D"
        ));
    }

    #[test]
    fn construction_rejects_mismatched_operators() {
        let op = Operator::new("op", 1, State::new(2), State::new(2), State::new(3));
        let err = Problem::new(vec!["A", "B"], vec![op]).unwrap_err();
        assert!(matches!(err, PlanningError::DimensionMismatch { expected: 2, found: 3, .. }));
    }

    #[test]
    fn construction_rejects_duplicate_names() {
        let err = Problem::new(vec!["A", "A"], vec![]).unwrap_err();
        assert!(matches!(err, PlanningError::DuplicateProposition(name) if name == "A"));
    }

    #[test]
    fn search_rejects_mismatched_states() {
        let problem = Problem::new(vec!["A", "B"], vec![]).unwrap();
        let err = problem
            .search(&crate::Zero, &State::new(3), &State::new(2))
            .unwrap_err();
        assert!(matches!(err, PlanningError::StateDimension { what: "start", .. }));
    }
}
