//! The propositional model: states, operators and problems.

pub mod operator;
pub mod problem;
pub mod state;

pub use operator::*;
pub use problem::*;
pub use state::*;
