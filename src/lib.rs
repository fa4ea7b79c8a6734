//! A propositional (STRIPS-style) planning core: a bitset state model with
//! delete-relaxed semantics, the additive and relaxed planning graph
//! heuristics, and an A* search engine consuming them.

pub mod prelude;

pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod model;
pub mod solver;
pub mod utils;

pub use error::*;
pub use frontier::*;
pub use heuristics::*;
pub use model::*;
pub use prelude::*;
pub use solver::*;
