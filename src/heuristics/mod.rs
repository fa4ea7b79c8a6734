//! The domain-independent heuristic estimators.

use std::{fmt::Display, str::FromStr};

use crate::{Cost, Heuristic, Operator, State};

pub mod additive;
pub mod relaxed_graph;

pub use additive::*;
pub use relaxed_graph::*;

/// The blind heuristic. Turns A* into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zero;
impl Heuristic for Zero {
    fn estimate(&self, _operators: &[Operator], _state: &State, _goal: &State) -> Cost {
        Cost::ZERO
    }
}

/// Runtime selection among the heuristics shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeuristicType {
    Zero,
    Additive,
    RelaxedGraph,
}
impl Heuristic for HeuristicType {
    fn estimate(&self, operators: &[Operator], state: &State, goal: &State) -> Cost {
        match self {
            HeuristicType::Zero => Zero.estimate(operators, state, goal),
            HeuristicType::Additive => Additive.estimate(operators, state, goal),
            HeuristicType::RelaxedGraph => RelaxedGraph.estimate(operators, state, goal),
        }
    }
}
impl FromStr for HeuristicType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(Self::Zero),
            "add" => Ok(Self::Additive),
            "ff" => Ok(Self::RelaxedGraph),
            _ => Err("Only 'zero', 'add' and 'ff' are allowed"),
        }
    }
}
impl Display for HeuristicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::Additive => write!(f, "add"),
            Self::RelaxedGraph => write!(f, "ff"),
        }
    }
}
