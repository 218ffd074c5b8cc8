mod variable;
pub use variable::*;

mod expr;
pub use expr::*;

mod constraint;
pub use constraint::*;

mod objective;
pub use objective::*;

mod model;
pub use model::*;

mod solution;
pub use solution::*;

use crate::EngineError;
use std::time::Duration;

/// A single-objective linear program, as seen by an engine.
///
/// Hierarchical objectives never reach an engine directly: the lexicographic
/// driver reduces them to a sequence of these, adding one frozen-tier
/// constraint per already-optimized tier.
pub struct Program<'a> {
    /// The diagnostic label of the model
    pub name: &'a str,
    /// Column definitions, indexed by `Var::index`
    pub variables: &'a [VariableDef],
    /// The rows of the program
    pub constraints: Vec<&'a Constraint>,
    /// Dense objective coefficients, one per variable
    pub objective: Vec<f64>,
    /// Whether to minimize or maximize the objective
    pub sense: Sense,
    /// An engine-native time limit, if the engine supports one
    pub time_limit: Option<Duration>,
    /// Whether the engine may print its own progress output
    pub verbose: bool,
}

impl Program<'_> {
    /// Whether any column is restricted to integer values
    pub fn has_integers(&self) -> bool {
        self.variables
            .iter()
            .any(|var| var.domain == Domain::Integer)
    }
}

/// The terminal state of one engine invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutcome {
    /// An optimal point, one value per column
    Optimal(Vec<f64>),
    /// No point satisfies the constraints
    Infeasible,
    /// The objective can be improved without limit
    Unbounded,
    /// The engine stopped at its own time limit
    TimeLimit,
}

/// The Engine trait is the boundary to the external optimization engine.
///
/// An engine solves one linear (or mixed-integer linear) program with a single
/// objective. It owns no state between calls, so a single engine can serve any
/// number of models, including concurrently from several threads.
pub trait Engine: Send + Sync + 'static {
    /// A short name for diagnostics
    fn name(&self) -> &'static str;

    /// Solve the program to optimality, or report why that was not possible
    fn solve(&self, program: &Program<'_>) -> Result<EngineOutcome, EngineError>;
}
