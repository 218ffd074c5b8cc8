#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/**
 * These are the adapters to the external solver engines.
 */
mod impls;
pub use impls::*;

/**
 * These are the building blocks of a model and its solution.
 */
mod types;
pub use types::*;

mod env;
pub use env::Environment;

mod error;
pub use error::{AllocError, ConstructionError, EngineError, ExtractionError};

mod lexicographic;

/// The concrete allocation problems built on top of the model types
pub mod formulations;

/// Write a model out in CPLEX LP format
pub mod export;

/// (De)serializable problem instances, for command-line and file-based use
#[cfg(feature = "io")]
pub mod io;

// Deterministic ordering matters for reproducible solves
pub(crate) type Set<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;
