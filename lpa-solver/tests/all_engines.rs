#![allow(unused_macros, dead_code)]
use lpa_core::models::{EngineKind, SolveConfig};
use lpa_solver::Environment;
use rstest_reuse::template;

// This creates a testing "template" to allow for the injection of each engine
// implementation. Only continuous models go through it, since Clarabel has no
// integer support.

#[template]
#[rstest]
#[case::microlp(lpa_core::models::EngineKind::Microlp)]
#[case::clarabel(lpa_core::models::EngineKind::Clarabel)]
pub fn all_engines(#[case] engine: EngineKind) {}

/// An environment for the given engine with the default timeout
pub fn environment(engine: EngineKind) -> Environment {
    Environment::new(SolveConfig {
        engine,
        ..Default::default()
    })
    .unwrap()
}

/// Interior point solutions are only accurate to a tolerance
pub fn epsilon(engine: EngineKind) -> f64 {
    match engine {
        EngineKind::Microlp => 1e-6,
        EngineKind::Clarabel => 1e-3,
    }
}
