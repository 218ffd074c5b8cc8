use lpa_core::models::{EngineKind, Trade};
use lpa_solver::{AllocError, EngineError, formulations::ReturnsProblem};
use rstest::*;

mod all_engines;
use all_engines::environment;

#[fixture]
fn trades() -> Vec<Trade> {
    vec![
        Trade::new("T1", 65000.0, 0.4, 70.0),
        Trade::new("T2", 2300.0, 2.5, 80.0),
        Trade::new("T3", 500.0, 2.4, 90.0),
        Trade::new("T4", 5600.0, 0.3, 100.0),
    ]
}

fn value(trades: &[Trade], quantities: &[u64]) -> f64 {
    trades
        .iter()
        .zip(quantities)
        .map(|(trade, &quantity)| trade.fee * quantity as f64)
        .sum()
}

// The scarce bound goes entirely to the item with the best coefficient
#[rstest]
#[test_log::test(tokio::test)]
async fn fills_the_best_item_first(trades: Vec<Trade>) {
    let env = environment(EngineKind::Microlp);
    let quantities = ReturnsProblem::new(&trades, 2000.0)
        .solve(&env, "returns")
        .await
        .unwrap();

    assert_eq!(quantities, vec![0, 2000, 0, 0]);
    assert_eq!(value(&trades, &quantities), 5000.0);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn spills_over_to_the_next_best_item(trades: Vec<Trade>) {
    let env = environment(EngineKind::Microlp);
    let quantities = ReturnsProblem::new(&trades, 2500.0)
        .solve(&env, "returns")
        .await
        .unwrap();

    assert_eq!(quantities, vec![0, 2300, 200, 0]);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn assigns_full_capacity_without_scarcity(trades: Vec<Trade>) {
    let env = environment(EngineKind::Microlp);
    let total: f64 = trades.iter().map(|trade| trade.quantity).sum();
    let quantities = ReturnsProblem::new(&trades, total + 1000.0)
        .solve(&env, "returns")
        .await
        .unwrap();

    assert_eq!(quantities, vec![65000, 2300, 500, 5600]);
}

#[rstest]
#[case(0.0)]
#[case(1.0)]
#[case(7777.0)]
#[case(70000.0)]
#[test_log::test(tokio::test)]
async fn respects_capacities_and_the_total(trades: Vec<Trade>, #[case] total: f64) {
    let env = environment(EngineKind::Microlp);
    let quantities = ReturnsProblem::new(&trades, total)
        .solve(&env, "returns")
        .await
        .unwrap();

    assert_eq!(quantities.len(), trades.len());
    for (trade, &quantity) in trades.iter().zip(quantities.iter()) {
        assert!(quantity as f64 <= trade.quantity);
    }
    assert!(quantities.iter().sum::<u64>() as f64 <= total);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn repeated_solves_agree(trades: Vec<Trade>) {
    let env = environment(EngineKind::Microlp);
    let problem = ReturnsProblem::new(&trades, 3333.0);

    let first = problem.solve(&env, "first").await.unwrap();
    let second = problem.solve(&env, "second").await.unwrap();
    assert_eq!(value(&trades, &first), value(&trades, &second));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn clarabel_rejects_integer_models(trades: Vec<Trade>) {
    let env = environment(EngineKind::Clarabel);
    let err = ReturnsProblem::new(&trades, 2000.0)
        .solve(&env, "returns")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AllocError::Solver(EngineError::Unsupported {
            engine: "clarabel",
            ..
        })
    ));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn rejects_negative_capacity_before_solving() {
    let env = environment(EngineKind::Microlp);
    let trades = vec![Trade::new("T1", -5.0, 1.0, 1.0)];
    let err = ReturnsProblem::new(&trades, 10.0)
        .solve(&env, "returns")
        .await
        .unwrap_err();

    assert!(matches!(err, AllocError::Construction(_)));
}
