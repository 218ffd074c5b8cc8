use crate::{ModelId, Status};
use std::time::Duration;

/// A model was malformed. Detected before anything reaches an engine.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConstructionError {
    #[error("variable `{name}` has invalid capacity {capacity}")]
    NegativeCapacity { name: String, capacity: f64 },

    #[error("variable `{0}` already exists in the model")]
    DuplicateVariable(String),

    #[error("constraint `{0}` already exists in the model")]
    DuplicateConstraint(String),

    #[error("`{0}` has no terms")]
    EmptyExpression(String),

    #[error("`{0}` mixes integer and continuous variables")]
    MixedDomain(String),

    #[error("`{name}` refers to a variable of model {found}, not {expected}")]
    ForeignVariable {
        name: String,
        expected: ModelId,
        found: ModelId,
    },

    #[error("`{0}` has a non-finite coefficient")]
    NonFiniteCoefficient(String),

    #[error("`{name}` has invalid bound {bound}")]
    InvalidBound { name: String, bound: f64 },

    #[error("`{name}` must not be negative, got {bound}")]
    NegativeBound { name: String, bound: f64 },

    #[error("the model has no objective")]
    MissingObjective,

    #[error("objective `{0}` has no terms")]
    EmptyObjective(String),
}

/// A solution value was requested that does not exist.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ExtractionError {
    #[error("no solution is available, the solve ended with status {0:?}")]
    NotOptimal(Status),

    #[error("the variable belongs to model {found}, not {expected}")]
    ForeignVariable { expected: ModelId, found: ModelId },

    #[error("solution {index} was requested, but only {count} are available")]
    NoSuchSolution { index: usize, count: usize },
}

/// The engine itself failed, as opposed to reporting a valid outcome.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{engine} cannot solve this model: {reason}")]
    Unsupported {
        engine: &'static str,
        reason: String,
    },

    #[error("{engine} failed: {reason}")]
    Internal {
        engine: &'static str,
        reason: String,
    },
}

/// Everything that can go wrong while allocating.
#[derive(Debug, thiserror::Error)]
pub enum AllocError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),

    /// Infeasible or unbounded: a valid answer, just not an allocation
    #[error("model `{model}` has no optimal allocation ({status:?})")]
    Infeasible { model: String, status: Status },

    #[error("model `{model}` did not finish within {limit:?}")]
    Timeout { model: String, limit: Duration },

    #[error(transparent)]
    Solver(#[from] EngineError),

    #[error("the solve of model `{model}` was aborted: {reason}")]
    Aborted { model: String, reason: String },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
