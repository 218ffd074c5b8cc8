use crate::{AllocError, Engine, Model, Solved, lexicographic};
use lpa_core::models::{EngineKind, SolveConfig};
use std::sync::Arc;
use tracing::{Level, event};

/// A long-lived handle to a solver engine.
///
/// The environment is the coarse resource: create one at startup and pass it
/// to every model build and solve. It is cheap to clone and may be shared
/// between tasks, since the engines keep no state between solves. Models, on
/// the other hand, are built per request and consumed by `optimize`.
#[derive(Clone)]
pub struct Environment {
    engine: Arc<dyn Engine>,
    config: SolveConfig,
}

impl Environment {
    /// Create an environment for the engine named in the config.
    ///
    /// Fails with `SolverUnavailable` if that engine was not compiled in.
    pub fn new(config: SolveConfig) -> Result<Self, AllocError> {
        let engine: Arc<dyn Engine> = match config.engine {
            #[cfg(feature = "microlp")]
            EngineKind::Microlp => Arc::new(crate::microlp::MicrolpEngine),
            #[cfg(feature = "clarabel")]
            EngineKind::Clarabel => Arc::new(crate::clarabel::ClarabelEngine),
            #[allow(unreachable_patterns)]
            other => {
                return Err(AllocError::SolverUnavailable(format!(
                    "{other:?} support was not compiled in"
                )));
            }
        };
        event!(Level::DEBUG, engine = engine.name(), timeout = ?config.timeout, "created environment");
        Ok(Self { engine, config })
    }

    /// Create an environment around any engine implementation
    pub fn with_engine(engine: impl Engine, config: SolveConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            config,
        }
    }

    /// The settings applied to every solve
    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// The name of the backing engine, for diagnostics
    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Start a new, empty model
    pub fn model(&self, name: impl Into<String>) -> Model {
        Model::new(name)
    }

    /// Submit a model to the engine and wait for a terminal status.
    ///
    /// The solve runs on tokio's blocking pool. If the configured timeout
    /// elapses first, `AllocError::Timeout` is returned and the model is
    /// dropped by the worker once the engine returns; the caller is never
    /// left waiting.
    pub async fn optimize(&self, model: Model) -> Result<Solved, AllocError> {
        model.validate()?;

        let label = model.name().to_owned();
        let engine = self.engine.clone();
        let config = self.config.clone();
        event!(
            Level::DEBUG,
            model = %model.id(),
            label = %label,
            variables = model.variables().len(),
            constraints = model.constraints().len(),
            "submitting model"
        );

        let task = tokio::task::spawn_blocking(move || {
            lexicographic::optimize(engine.as_ref(), model, &config)
        });

        let joined = match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    event!(Level::WARN, label = %label, ?limit, "solve timed out");
                    return Err(AllocError::Timeout {
                        model: label,
                        limit,
                    });
                }
            },
            None => task.await,
        };

        let solved = joined.map_err(|err| AllocError::Aborted {
            model: label.clone(),
            reason: err.to_string(),
        })??;

        event!(Level::DEBUG, label = %label, status = ?solved.status(), "solve finished");
        Ok(solved)
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("engine", &self.engine.name())
            .field("config", &self.config)
            .finish()
    }
}
