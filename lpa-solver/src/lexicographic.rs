// Hierarchical objectives are solved the way commercial engines solve them:
// one tier at a time, from the highest priority down. After a tier reaches its
// optimum z*, a row `tier >= z* - max(abs_tol, rel_tol * |z*|)` (or `<=` when
// minimizing) is added so that lower tiers may only spend the freedom the
// higher tiers left over.

use crate::{
    AllocError, Constraint, ConstructionError, Engine, EngineError, EngineOutcome, Model, ModelId,
    Objective, Program, Relation, Sense, Solved, Status, VariableDef,
};
use lpa_core::models::SolveConfig;
use tracing::{Level, event, span};

/// Absolute relaxations tried, in order, when an exactly frozen tier leaves
/// the next tier infeasible through floating point noise in z*.
const FEASIBILITY_STEPS: [f64; 4] = [1e-9, 1e-7, 1e-5, 1e-3];

/// How far a frozen row may be violated at the final point before it is
/// reported
const FROZEN_TOLERANCE: f64 = 1e-6;

/// Run every tier of the model's objective through the engine.
pub(crate) fn optimize(
    engine: &dyn Engine,
    model: Model,
    config: &SolveConfig,
) -> Result<Solved, AllocError> {
    let Model {
        id,
        name,
        variables,
        constraints,
        objective,
        ..
    } = model;

    let objective = objective.ok_or(ConstructionError::MissingObjective)?;
    let sense = objective.sense();
    let tiers = objective.tiers(variables.len());

    let span = span!(Level::DEBUG, "optimize", model = %id, label = %name, engine = engine.name());
    let _guard = span.enter();

    let mut frozen: Vec<Constraint> = Vec::new();
    let mut frozen_base = 0.0;
    let mut values = Vec::new();

    for (position, tier) in tiers.iter().enumerate() {
        let mut relaxations = FEASIBILITY_STEPS.iter();
        let outcome = loop {
            let outcome = {
                let program = Program {
                    name: &name,
                    variables: &variables,
                    constraints: constraints.iter().chain(frozen.iter()).collect(),
                    objective: tier.coefficients.clone(),
                    sense,
                    time_limit: config.timeout,
                    verbose: config.verbose,
                };
                engine.solve(&program)?
            };

            // Only the most recent frozen row can be at fault: the previous
            // program was feasible with every other row.
            match (outcome, frozen.last_mut(), position > 0) {
                (EngineOutcome::Infeasible, Some(row), true) => {
                    let Some(&epsilon) = relaxations.next() else {
                        return Err(EngineError::Internal {
                            engine: engine.name(),
                            reason: format!("tier {} lost feasibility", tier.priority),
                        }
                        .into());
                    };
                    row.bound = frozen_base
                        + match row.relation {
                            Relation::Ge => -epsilon,
                            _ => epsilon,
                        };
                    event!(
                        Level::WARN,
                        priority = tier.priority,
                        epsilon,
                        "relaxed frozen tier for feasibility"
                    );
                }
                (outcome, _, _) => break outcome,
            }
        };
        event!(
            Level::DEBUG,
            priority = tier.priority,
            outcome = outcome_kind(&outcome),
            "solved tier"
        );

        values = match outcome {
            EngineOutcome::Optimal(values) => values,
            EngineOutcome::TimeLimit => {
                return Err(AllocError::Timeout {
                    model: name,
                    limit: config.timeout.unwrap_or_default(),
                });
            }
            // A later tier only adds rows that the previous optimum satisfies,
            // so it cannot become infeasible unless the engine misbehaved.
            EngineOutcome::Infeasible if position > 0 => {
                return Err(EngineError::Internal {
                    engine: engine.name(),
                    reason: format!("tier {} lost feasibility", tier.priority),
                }
                .into());
            }
            EngineOutcome::Infeasible => {
                return Ok(unsolved(id, name, Status::Infeasible, variables, &objective));
            }
            EngineOutcome::Unbounded => {
                return Ok(unsolved(id, name, Status::Unbounded, variables, &objective));
            }
        };

        // a tier whose terms cancel out constrains nothing
        if position + 1 < tiers.len() && tier.coefficients.iter().any(|&coef| coef != 0.0) {
            let optimum = tier.expr.evaluate(&values);
            let allowance = tier.abs_tol.max(tier.rel_tol * optimum.abs());
            let (relation, bound) = match sense {
                Sense::Maximize => (Relation::Ge, optimum - allowance),
                Sense::Minimize => (Relation::Le, optimum + allowance),
            };
            event!(Level::TRACE, priority = tier.priority, optimum, bound, "froze tier");

            frozen_base = bound;
            frozen.push(Constraint {
                name: format!("tier[{}]", tier.priority),
                expr: tier.expr.clone(),
                relation,
                bound,
            });
        }
    }

    let snapped: Vec<f64> = variables
        .iter()
        .zip(values.iter())
        .map(|(var, &raw)| var.snap(raw))
        .collect();

    for row in frozen.iter() {
        if !row.is_satisfied(&snapped, FROZEN_TOLERANCE) {
            event!(
                Level::WARN,
                tier = %row.name,
                value = row.expr.evaluate(&snapped),
                bound = row.bound,
                "final point violates a frozen tier"
            );
        }
    }

    Ok(Solved {
        model: id,
        name,
        status: Status::Optimal,
        objectives: objective.reported(),
        variables,
        pool: vec![snapped],
        active: 0,
    })
}

fn unsolved(
    id: ModelId,
    name: String,
    status: Status,
    variables: Vec<VariableDef>,
    objective: &Objective,
) -> Solved {
    event!(Level::DEBUG, model = %id, ?status, "no optimum");
    Solved {
        model: id,
        name,
        status,
        variables,
        pool: Vec::new(),
        active: 0,
        objectives: objective.reported(),
    }
}

fn outcome_kind(outcome: &EngineOutcome) -> &'static str {
    match outcome {
        EngineOutcome::Optimal(_) => "optimal",
        EngineOutcome::Infeasible => "infeasible",
        EngineOutcome::Unbounded => "unbounded",
        EngineOutcome::TimeLimit => "time limit",
    }
}
