use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::{Operator, Problem, State};

/// A non-negative path cost with a dedicated saturating infinity.
///
/// Every arithmetic operation saturates, so `INFINITY` absorbs anything it is
/// added to and can safely be compared with finite costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(u64);

impl Cost {
    pub const ZERO: Cost = Cost(0);
    pub const INFINITY: Cost = Cost(u64::MAX);

    pub const fn new(value: u64) -> Self {
        Cost(value)
    }
    pub fn is_finite(self) -> bool {
        self != Cost::INFINITY
    }
    /// The finite value of this cost, or None for `INFINITY`.
    pub fn value(self) -> Option<u64> {
        self.is_finite().then_some(self.0)
    }
}
impl From<u64> for Cost {
    fn from(value: u64) -> Self {
        Cost(value)
    }
}
impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0.saturating_add(rhs.0))
    }
}
impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        *self = *self + rhs;
    }
}
impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, Add::add)
    }
}
impl Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "inf"),
        }
    }
}

/// The position of an operator in its problem's operator list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatorId(pub usize);

impl OperatorId {
    pub fn id(self) -> usize {
        self.0
    }
}

/// A stable identifier for a state interned in the search arena. It remains
/// valid for the whole search, however much the arena grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub usize);

impl StateId {
    pub fn id(self) -> usize {
        self.0
    }
}

/// A domain-independent estimate of the cost of reaching `goal` from `state`.
///
/// Implementations may return `Cost::INFINITY` to flag `state` as a dead end.
/// The search engine only guarantees optimal plans when the heuristic is
/// admissible (never overestimates the true cost).
pub trait Heuristic {
    fn estimate(&self, operators: &[Operator], state: &State, goal: &State) -> Cost;
}

/// An entry of the open list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// The state this entry stands for
    pub state: StateId,
    /// The cost of the best known path to `state` when the entry was pushed
    pub g: Cost,
    /// g + h
    pub f: Cost,
    /// Insertion sequence number, used to break ties first-in-first-out
    pub seq: usize,
}

pub trait Frontier {
    /// This is how you push a node onto the frontier.
    fn push(&mut self, node: Node);
    /// This method yields the most promising node from the frontier.
    /// # Note:
    /// The search relies on the assumption that a frontier pops nodes by
    /// increasing f, and among equal f, by increasing insertion sequence.
    fn pop(&mut self) -> Option<Node>;
    /// This method clears the frontier: it removes all nodes from the queue.
    fn clear(&mut self);
    /// Yields the length of the queue.
    fn len(&self) -> usize;
    /// Returns true iff the frontier is empty (len == 0)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sequence of operators leading from the start state to the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<OperatorId>,
    pub cost: Cost,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    /// The names of the operators of this plan, in execution order.
    pub fn names<'a>(&self, problem: &'a Problem) -> Vec<&'a str> {
        self.steps.iter().map(|op| problem.operator(*op).name()).collect()
    }
}

/// The outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanResult {
    Found(Plan),
    /// The search space was exhausted without reaching the goal.
    NotFound,
}

impl PlanResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PlanResult::Found(_))
    }
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            PlanResult::Found(plan) => Some(plan),
            PlanResult::NotFound => None,
        }
    }
    pub fn cost(&self) -> Option<Cost> {
        self.plan().map(|plan| plan.cost)
    }
}
impl Display for PlanResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanResult::Found(_) => write!(f, "Found"),
            PlanResult::NotFound => write!(f, "NoPlan"),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierType {
    Simple,
    NoDup,
}
impl FromStr for FrontierType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "nodup" => Ok(Self::NoDup),
            _ => Err("The only supported frontier types are 'simple' and 'nodup'"),
        }
    }
}
impl Display for FrontierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::NoDup => write!(f, "nodup"),
        }
    }
}
