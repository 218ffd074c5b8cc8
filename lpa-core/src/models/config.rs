use std::time::Duration;

/// The solver engines an environment can be backed by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum EngineKind {
    /// Pure-Rust simplex with branch and bound; handles integer variables
    #[default]
    Microlp,
    /// Interior point conic solver; continuous problems only
    Clarabel,
}

/// Settings applied to every solve performed through one environment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SolveConfig {
    /// Which engine to solve with
    pub engine: EngineKind,

    /// Upper bound on the wall-clock time of a single solve. `None` waits
    /// indefinitely.
    #[cfg_attr(feature = "serde", serde(with = "humantime_serde"))]
    pub timeout: Option<Duration>,

    /// Let the engine print its own progress output
    pub verbose: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            timeout: Some(Duration::from_secs(60)),
            verbose: false,
        }
    }
}
