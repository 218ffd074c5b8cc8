use std::sync::atomic::{AtomicU64, Ordering};

/// Whether a decision variable takes integer or real values.
///
/// The domain is a property of the problem type: every variable of one
/// expression shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Domain {
    /// Whole numbers only
    Integer,
    /// Any real value within the bounds
    Continuous,
}

/// Identifies one model instance for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub(crate) u64);

impl ModelId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A handle to a decision variable.
///
/// Handles are cheap to copy and remember the model that issued them, so a
/// handle can never silently address a column of a different model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var {
    pub(crate) model: ModelId,
    pub(crate) index: usize,
}

impl Var {
    /// The column index of this variable within its model
    pub fn index(&self) -> usize {
        self.index
    }

    /// The model that created this variable
    pub fn model(&self) -> ModelId {
        self.model
    }
}

/// The declaration of a decision variable: `lower <= x <= upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    /// Unique within the model
    pub name: String,
    /// Integer or continuous
    pub domain: Domain,
    /// Always zero for variables created through `Model`
    pub lower: f64,
    /// May be infinite
    pub upper: f64,
}

impl VariableDef {
    /// Snap a raw engine value onto this variable's domain and bounds
    pub(crate) fn snap(&self, raw: f64) -> f64 {
        let value = match self.domain {
            Domain::Integer => raw.round(),
            Domain::Continuous => raw,
        };
        value.clamp(self.lower, self.upper)
    }
}
