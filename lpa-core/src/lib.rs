#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the allocation system.
///
/// These are plain data carriers plus the `AllocatableItem` abstraction that
/// the formulations in `lpa-solver` are generic over. They carry no solver
/// logic of their own.
pub mod models;
