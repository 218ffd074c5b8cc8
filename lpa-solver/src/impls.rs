/// Engine using the microlp simplex and branch-and-bound solver
#[cfg(feature = "microlp")]
pub mod microlp;

/// Engine using the Clarabel interior point solver
#[cfg(feature = "clarabel")]
pub mod clarabel;
