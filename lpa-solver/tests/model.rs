use lpa_core::models::{EngineKind, SolveConfig};
use lpa_solver::{
    AllocError, ConstructionError, Domain, Engine, EngineError, EngineOutcome, Environment,
    ExtractionError, LinearExpr, Model, ObjectiveTerm, Program, Relation, Sense, Status,
};
use rstest::*;
use rstest_reuse::{self, *};
use std::time::Duration;

mod all_engines;
use all_engines::{all_engines, environment, epsilon};

/// An engine that takes its time before giving up
struct SlowEngine(Duration);

impl Engine for SlowEngine {
    fn name(&self) -> &'static str {
        "slow"
    }

    fn solve(&self, _: &Program<'_>) -> Result<EngineOutcome, EngineError> {
        std::thread::sleep(self.0);
        Ok(EngineOutcome::Infeasible)
    }
}

/// An engine that always crashes
struct BrokenEngine;

impl Engine for BrokenEngine {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn solve(&self, _: &Program<'_>) -> Result<EngineOutcome, EngineError> {
        Err(EngineError::Internal {
            engine: "broken",
            reason: "license expired".to_owned(),
        })
    }
}

fn single(var: lpa_solver::Var, coefficient: f64) -> LinearExpr {
    let mut expr = LinearExpr::new();
    expr.add_term(coefficient, var);
    expr
}

// x <= 5 by its bound, x >= 10 by constraint
fn infeasible(env: &Environment) -> Model {
    let mut model = env.model("infeasible");
    let x = model.add_var("x", Domain::Continuous, 5.0).unwrap();
    model
        .add_constraint("floor", single(x, 1.0), Relation::Ge, 10.0)
        .unwrap();
    model.set_objective(single(x, 1.0), Sense::Maximize).unwrap();
    model
}

#[apply(all_engines)]
#[test_log::test(tokio::test)]
async fn reports_infeasible(#[case] engine: EngineKind) {
    let env = environment(engine);
    let solved = env.optimize(infeasible(&env)).await.unwrap();

    assert_eq!(solved.status(), Status::Infeasible);
    assert_eq!(solved.solution_count(), 0);
    assert!(matches!(
        solved.objective_value(),
        Err(ExtractionError::NotOptimal(Status::Infeasible))
    ));
    assert!(matches!(
        solved.into_optimal(),
        Err(AllocError::Infeasible {
            status: Status::Infeasible,
            ..
        })
    ));
}

#[apply(all_engines)]
#[test_log::test(tokio::test)]
async fn reports_unbounded(#[case] engine: EngineKind) {
    let env = environment(engine);
    let mut model = env.model("unbounded");
    let x = model
        .add_var("x", Domain::Continuous, f64::INFINITY)
        .unwrap();
    model
        .add_constraint("floor", single(x, 1.0), Relation::Ge, 1.0)
        .unwrap();
    model.set_objective(single(x, 1.0), Sense::Maximize).unwrap();

    let solved = env.optimize(model).await.unwrap();
    assert_eq!(solved.status(), Status::Unbounded);
}

#[apply(all_engines)]
#[test_log::test(tokio::test)]
async fn reads_values_in_request_order(#[case] engine: EngineKind) {
    let env = environment(engine);
    let mut model = env.model("ordered");
    let x = model.add_var("x", Domain::Continuous, 3.0).unwrap();
    let y = model.add_var("y", Domain::Continuous, 4.0).unwrap();
    let expr: LinearExpr = [(x, 1.0), (y, 2.0)].into_iter().collect();
    model.set_objective(expr, Sense::Maximize).unwrap();

    let solved = env.optimize(model).await.unwrap();
    let values = solved.values(&[y, x, y]).unwrap();

    assert_eq!(values.len(), 3);
    approx::assert_abs_diff_eq!(values[0], 4.0, epsilon = epsilon(engine));
    approx::assert_abs_diff_eq!(values[1], 3.0, epsilon = epsilon(engine));
    approx::assert_abs_diff_eq!(values[2], 4.0, epsilon = epsilon(engine));
    approx::assert_abs_diff_eq!(
        solved.objective_value().unwrap(),
        11.0,
        epsilon = epsilon(engine) * 10.0
    );
}

// A secondary term with its own sense is negated inside the tier
#[apply(all_engines)]
#[test_log::test(tokio::test)]
async fn opposing_term_sense_is_honored(#[case] engine: EngineKind) {
    let env = environment(engine);
    let mut model = env.model("opposed");
    let x = model.add_var("x", Domain::Continuous, 10.0).unwrap();
    let y = model.add_var("y", Domain::Continuous, 10.0).unwrap();
    let both: LinearExpr = [(x, 1.0), (y, 1.0)].into_iter().collect();
    model
        .add_constraint("total", both.clone(), Relation::Le, 10.0)
        .unwrap();
    model
        .set_objectives(
            Sense::Maximize,
            vec![
                ObjectiveTerm::new("total", both).priority(2),
                ObjectiveTerm::new("y", single(y, 1.0))
                    .priority(1)
                    .sense(Sense::Minimize),
            ],
        )
        .unwrap();

    let solved = env.optimize(model).await.unwrap();
    approx::assert_abs_diff_eq!(solved.value(x).unwrap(), 10.0, epsilon = epsilon(engine));
    approx::assert_abs_diff_eq!(solved.value(y).unwrap(), 0.0, epsilon = epsilon(engine));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn rounds_integer_values() {
    let env = environment(EngineKind::Microlp);
    let mut model = env.model("integer");
    let x = model.add_var("x", Domain::Integer, 7.0).unwrap();
    model
        .add_constraint("half", single(x, 2.0), Relation::Le, 9.0)
        .unwrap();
    model.set_objective(single(x, 1.0), Sense::Maximize).unwrap();

    let solved = env.optimize(model).await.unwrap();
    assert_eq!(solved.value(x).unwrap(), 4.0);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn rejects_foreign_reads() {
    let env = environment(EngineKind::Microlp);
    let other = env.model("other").add_var("z", Domain::Continuous, 1.0).unwrap();

    let mut model = env.model("mine");
    let x = model.add_var("x", Domain::Continuous, 1.0).unwrap();
    model.set_objective(single(x, 1.0), Sense::Maximize).unwrap();
    let solved = env.optimize(model).await.unwrap();

    assert!(matches!(
        solved.value(other),
        Err(ExtractionError::ForeignVariable { .. })
    ));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn rejects_missing_objective() {
    let env = environment(EngineKind::Microlp);
    let mut model = env.model("aimless");
    model.add_var("x", Domain::Continuous, 1.0).unwrap();

    let err = env.optimize(model).await.unwrap_err();
    assert!(matches!(
        err,
        AllocError::Construction(ConstructionError::MissingObjective)
    ));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn out_of_range_selection_fails() {
    let env = environment(EngineKind::Microlp);
    let mut model = env.model("pool");
    let x = model.add_var("x", Domain::Continuous, 1.0).unwrap();
    model.set_objective(single(x, 1.0), Sense::Maximize).unwrap();

    let mut solved = env.optimize(model).await.unwrap();
    assert_eq!(solved.solution_count(), 1);
    assert_eq!(
        solved.select(1),
        Err(ExtractionError::NoSuchSolution { index: 1, count: 1 })
    );
}

#[rstest]
#[test_log::test(tokio::test)]
async fn times_out() {
    let config = SolveConfig {
        timeout: Some(Duration::from_millis(20)),
        ..Default::default()
    };
    let env = Environment::with_engine(SlowEngine(Duration::from_millis(500)), config);

    let err = env.optimize(infeasible(&env)).await.unwrap_err();
    assert!(matches!(
        err,
        AllocError::Timeout { limit, .. } if limit == Duration::from_millis(20)
    ));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn engine_failures_are_not_infeasibility() {
    let env = Environment::with_engine(BrokenEngine, SolveConfig::default());

    let err = env.optimize(infeasible(&env)).await.unwrap_err();
    assert!(matches!(
        err,
        AllocError::Solver(EngineError::Internal {
            engine: "broken",
            ..
        })
    ));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn environment_is_shared_across_tasks() {
    let env = environment(EngineKind::Microlp);

    let handles: Vec<_> = (1..=4)
        .map(|cap| {
            let env = env.clone();
            tokio::spawn(async move {
                let mut model = env.model(format!("task-{cap}"));
                let x = model
                    .add_var("x", Domain::Continuous, cap as f64)
                    .unwrap();
                model.set_objective(single(x, 1.0), Sense::Maximize).unwrap();
                let solved = env.optimize(model).await.unwrap();
                solved.value(x).unwrap()
            })
        })
        .collect();

    for (cap, handle) in (1..=4).zip(handles) {
        assert_eq!(handle.await.unwrap(), cap as f64);
    }
}
