//! This module provides the implementation of usual frontiers.
use compare::Compare;
use std::cmp::Ordering;

use crate::Node;

/// Orders nodes so that the *greatest* one is the node with the lowest f;
/// among equal f, the one inserted first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinF;
impl Compare<Node> for MinF {
    fn compare(&self, l: &Node, r: &Node) -> Ordering {
        r.f.cmp(&l.f).then_with(|| r.seq.cmp(&l.seq))
    }
}

pub mod no_dup;
pub mod simple;

pub use no_dup::*;
pub use simple::*;
