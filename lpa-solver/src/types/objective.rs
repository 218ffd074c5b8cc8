use super::LinearExpr;

/// The direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Sense {
    /// Drive the objective down
    Minimize,
    /// Drive the objective up
    Maximize,
}

/// One entry of a hierarchical objective.
///
/// `priority` and `weight` are not interchangeable. Priorities form
/// lexicographic tiers: every tier is optimized before any tier of lower
/// priority is considered, and is then frozen up to its tolerances. Weights
/// only scale a term against the other terms of the same tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveTerm {
    /// Unique within the objective; reported values are keyed by it
    pub name: String,
    /// The expression to optimize
    pub expr: LinearExpr,
    /// Higher tiers are optimized first
    pub priority: i32,
    /// Scale against the other terms of the same priority
    pub weight: f64,
    /// Absolute degradation allowed when this tier is frozen
    pub abs_tol: f64,
    /// Relative degradation allowed when this tier is frozen
    pub rel_tol: f64,
    /// The term's own direction; `None` follows the model's sense
    pub sense: Option<Sense>,
}

impl ObjectiveTerm {
    /// A term at priority 0 with unit weight and no tolerance
    pub fn new(name: impl Into<String>, expr: LinearExpr) -> Self {
        Self {
            name: name.into(),
            expr,
            priority: 0,
            weight: 1.0,
            abs_tol: 0.0,
            rel_tol: 0.0,
            sense: None,
        }
    }

    /// Place the term in another tier
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Scale the term within its tier
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Allow the tier to degrade by `max(abs_tol, rel_tol * |z*|)` once frozen
    pub fn tolerances(mut self, abs_tol: f64, rel_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self.rel_tol = rel_tol;
        self
    }

    /// Optimize this term in its own direction, whatever the model's sense
    pub fn sense(mut self, sense: Sense) -> Self {
        self.sense = Some(sense);
        self
    }

    /// The factor this term's expression contributes with under `global`
    pub(crate) fn scale(&self, global: Sense) -> f64 {
        match self.sense {
            Some(sense) if sense != global => -self.weight,
            _ => self.weight,
        }
    }
}

/// What the model optimizes.
#[derive(Debug, Clone, PartialEq)]
pub enum Objective {
    /// One expression
    Single { expr: LinearExpr, sense: Sense },
    /// Several terms, optimized tier by tier under one global sense
    Hierarchical { sense: Sense, terms: Vec<ObjectiveTerm> },
}

/// One lexicographic tier, reduced to a dense objective.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tier {
    pub priority: i32,
    /// The weighted sum of the tier's terms
    pub expr: LinearExpr,
    /// `expr` scattered into one coefficient per column
    pub coefficients: Vec<f64>,
    pub abs_tol: f64,
    pub rel_tol: f64,
}

impl Objective {
    /// The global direction of optimization
    pub fn sense(&self) -> Sense {
        match self {
            Self::Single { sense, .. } | Self::Hierarchical { sense, .. } => *sense,
        }
    }

    /// The named expressions whose values are reported after a solve
    pub(crate) fn reported(&self) -> Vec<(String, LinearExpr)> {
        match self {
            Self::Single { expr, .. } => vec![("objective".to_owned(), expr.clone())],
            Self::Hierarchical { terms, .. } => terms
                .iter()
                .map(|term| (term.name.clone(), term.expr.clone()))
                .collect(),
        }
    }

    /// Reduce the objective to tiers, highest priority first.
    ///
    /// Terms of equal priority are merged into one weighted sum; the tier keeps
    /// the loosest tolerance of its members.
    pub(crate) fn tiers(&self, columns: usize) -> Vec<Tier> {
        match self {
            Self::Single { expr, .. } => {
                let mut coefficients = vec![0.0; columns];
                expr.accumulate_into(&mut coefficients, 1.0);
                vec![Tier {
                    priority: 0,
                    expr: expr.clone(),
                    coefficients,
                    abs_tol: 0.0,
                    rel_tol: 0.0,
                }]
            }
            Self::Hierarchical { sense, terms } => {
                let mut priorities = terms.iter().map(|term| term.priority).collect::<Vec<_>>();
                priorities.sort_unstable_by(|a, b| b.cmp(a));
                priorities.dedup();

                priorities
                    .into_iter()
                    .map(|priority| {
                        let mut tier = Tier {
                            priority,
                            expr: LinearExpr::new(),
                            coefficients: vec![0.0; columns],
                            abs_tol: 0.0,
                            rel_tol: 0.0,
                        };
                        for term in terms.iter().filter(|term| term.priority == priority) {
                            tier.expr.add_scaled(term.scale(*sense), &term.expr);
                            tier.abs_tol = tier.abs_tol.max(term.abs_tol);
                            tier.rel_tol = tier.rel_tol.max(term.rel_tol);
                        }
                        tier.expr.accumulate_into(&mut tier.coefficients, 1.0);
                        tier
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ModelId, Var};

    fn var(index: usize) -> Var {
        Var {
            model: ModelId(0),
            index,
        }
    }

    #[test]
    fn tiers_run_from_highest_priority() {
        let objective = Objective::Hierarchical {
            sense: Sense::Maximize,
            terms: vec![
                ObjectiveTerm::new("low", [(var(0), 1.0)].into_iter().collect()).priority(1),
                ObjectiveTerm::new("high", [(var(1), 1.0)].into_iter().collect()).priority(10),
            ],
        };
        let tiers = objective.tiers(2);
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].priority, 10);
        assert_eq!(tiers[0].coefficients, vec![0.0, 1.0]);
        assert_eq!(tiers[1].coefficients, vec![1.0, 0.0]);
    }

    #[test]
    fn equal_priorities_share_a_weighted_tier() {
        let objective = Objective::Hierarchical {
            sense: Sense::Maximize,
            terms: vec![
                ObjectiveTerm::new("a", [(var(0), 1.0)].into_iter().collect())
                    .weight(2.0)
                    .tolerances(0.5, 0.0),
                ObjectiveTerm::new("b", [(var(0), 1.0), (var(1), 3.0)].into_iter().collect())
                    .sense(Sense::Minimize)
                    .tolerances(0.0, 0.01),
            ],
        };
        let tiers = objective.tiers(2);
        assert_eq!(tiers.len(), 1);
        // 2 * x0 - (x0 + 3 * x1)
        assert_eq!(tiers[0].coefficients, vec![1.0, -3.0]);
        assert_eq!(tiers[0].expr.len(), 3);
        assert_eq!(tiers[0].expr.evaluate(&[1.0, 1.0]), -2.0);
        assert_eq!(tiers[0].abs_tol, 0.5);
        assert_eq!(tiers[0].rel_tol, 0.01);
    }
}
