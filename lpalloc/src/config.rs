//! Layered configuration for the command line tools.
//!
//! Settings are merged from defaults, an optional TOML file and environment
//! variables, in increasing order of precedence.

use lpa_core::models::SolveConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The configuration of a single invocation
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AppConfig {
    /// Engine selection, timeout and verbosity for every solve
    #[serde(default)]
    pub solver: SolveConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `LPALLOC_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// export LPALLOC_SOLVER__ENGINE="clarabel"
    /// export LPALLOC_SOLVER__TIMEOUT="5m"
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        config = config.add_source(
            config::Environment::with_prefix("LPALLOC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpa_core::models::EngineKind;
    use std::time::Duration;

    #[test]
    fn reads_a_toml_file() {
        let path = std::env::temp_dir().join(format!("lpalloc-{}.toml", std::process::id()));
        std::fs::write(&path, "[solver]\nengine = \"clarabel\"\ntimeout = \"2m\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.solver.engine, EngineKind::Clarabel);
        assert_eq!(config.solver.timeout, Some(Duration::from_secs(120)));
        assert!(!config.solver.verbose);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("lpalloc-does-not-exist.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
