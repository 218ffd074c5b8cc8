use crate::{Domain, Engine, EngineError, EngineOutcome, Program, Relation, Sense};
use microlp::{ComparisonOp, OptimizationDirection, Problem};

/// An engine backed by microlp.
///
/// microlp is a dense simplex implementation with branch and bound on top,
/// so it handles both continuous and integer columns. It has no notion of a
/// time limit; the environment's timeout is the only bound on a solve.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpEngine;

impl MicrolpEngine {
    const NAME: &'static str = "microlp";
}

impl Engine for MicrolpEngine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn solve(&self, program: &Program<'_>) -> Result<EngineOutcome, EngineError> {
        let direction = match program.sense {
            Sense::Minimize => OptimizationDirection::Minimize,
            Sense::Maximize => OptimizationDirection::Maximize,
        };
        let mut problem = Problem::new(direction);

        // microlp takes the objective coefficient at column creation
        let mut columns = Vec::with_capacity(program.variables.len());
        for (var, &coef) in program.variables.iter().zip(program.objective.iter()) {
            let column = match var.domain {
                Domain::Continuous => problem.add_var(coef, (var.lower, var.upper)),
                Domain::Integer => {
                    let lower = integer_bound(&var.name, var.lower)?;
                    let upper = integer_bound(&var.name, var.upper.floor())?;
                    problem.add_integer_var(coef, (lower, upper))
                }
            };
            columns.push(column);
        }

        for row in program.constraints.iter() {
            let op = match row.relation {
                Relation::Le => ComparisonOp::Le,
                Relation::Eq => ComparisonOp::Eq,
                Relation::Ge => ComparisonOp::Ge,
            };
            let expr = row
                .expr
                .terms()
                .iter()
                .map(|&(var, coef)| (columns[var.index()], coef));
            problem.add_constraint(expr, op, row.bound);
        }

        match problem.solve() {
            Ok(solution) => Ok(EngineOutcome::Optimal(
                columns.iter().map(|&column| solution[column]).collect(),
            )),
            Err(microlp::Error::Infeasible) => Ok(EngineOutcome::Infeasible),
            Err(microlp::Error::Unbounded) => Ok(EngineOutcome::Unbounded),
            Err(err) => Err(EngineError::Internal {
                engine: Self::NAME,
                reason: err.to_string(),
            }),
        }
    }
}

// microlp integer columns are bounded by i32
fn integer_bound(name: &str, bound: f64) -> Result<i32, EngineError> {
    if bound.is_finite() && bound >= i32::MIN as f64 && bound <= i32::MAX as f64 {
        Ok(bound as i32)
    } else {
        Err(EngineError::Unsupported {
            engine: MicrolpEngine::NAME,
            reason: format!("integer variable `{name}` has bound {bound} outside the i32 range"),
        })
    }
}
