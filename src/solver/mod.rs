//! The best-first search engine.

pub mod arena;
pub mod astar;

pub use arena::*;
pub use astar::*;
