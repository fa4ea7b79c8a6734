use thiserror::Error;

/// The errors raised while building a problem or handing it malformed
/// states. Unreachable goals are not errors: see `PlanResult::NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    #[error("operator `{operator}`: {field} span {found} propositions, expected {expected}")]
    DimensionMismatch {
        operator: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{what} state spans {found} propositions, expected {expected}")]
    StateDimension {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("operator `{0}` has an infinite cost")]
    InfiniteCost(String),
    #[error("unknown proposition `{0}`")]
    UnknownProposition(String),
    #[error("proposition `{0}` is declared twice")]
    DuplicateProposition(String),
}
