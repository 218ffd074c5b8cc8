use super::LinearExpr;
use std::fmt;

/// The relational operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `expr <= bound`
    Le,
    /// `expr == bound`
    Eq,
    /// `expr >= bound`
    Ge,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Le => "<=",
            Self::Eq => "=",
            Self::Ge => ">=",
        })
    }
}

/// A named linear constraint `expr ⋈ bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Unique within the model
    pub name: String,
    /// The left-hand side
    pub expr: LinearExpr,
    /// How the left-hand side relates to the bound
    pub relation: Relation,
    /// The right-hand side, always finite
    pub bound: f64,
}

impl Constraint {
    /// Whether the constraint holds at `values`, up to an absolute tolerance
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::Le => lhs <= self.bound + tolerance,
            Relation::Eq => (lhs - self.bound).abs() <= tolerance,
            Relation::Ge => lhs >= self.bound - tolerance,
        }
    }
}
