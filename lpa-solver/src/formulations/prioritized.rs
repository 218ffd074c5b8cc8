use crate::{
    AllocError, ConstructionError, Domain, Environment, LinearExpr, Model, ObjectiveTerm,
    Relation, Sense, Var,
};
use lpa_core::models::RatedItem;

/// Where one objective sits in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierSpec {
    /// Higher priorities are settled first
    pub priority: i32,
    /// Scale against an objective sharing the same priority
    pub weight: f64,
    /// Absolute degradation allowed once settled
    pub abs_tol: f64,
    /// Degradation allowed once settled, relative to the optimum
    pub rel_tol: f64,
}

/// The placement of the cost and rate objectives.
///
/// The default settles cost at priority 10 before rate at priority 1, both
/// with unit weight and no degradation allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriorityScheme {
    /// Placement of the summed cost coefficients
    pub cost: TierSpec,
    /// Placement of the summed rate coefficients
    pub rate: TierSpec,
}

impl Default for PriorityScheme {
    fn default() -> Self {
        Self {
            cost: TierSpec {
                priority: 10,
                weight: 1.0,
                abs_tol: 0.0,
                rel_tol: 0.0,
            },
            rate: TierSpec {
                priority: 1,
                weight: 1.0,
                abs_tol: 0.0,
                rel_tol: 0.0,
            },
        }
    }
}

/// The result of a tiered allocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TieredAllocation {
    /// The (continuous) quantity given to each item, in item order
    pub quantities: Vec<f64>,
    /// The value of the cost objective
    pub cost: f64,
    /// The value of the rate objective
    pub rate: f64,
}

/// Allocate up to `needs` units across items under two objectives: the items'
/// cost coefficients and their rate coefficients, tiered by a
/// [`PriorityScheme`].
///
/// The sense applies to both objectives. Whether the coefficients are costs to
/// minimize or benefits to maximize is the caller's call.
#[derive(Debug, Clone)]
pub struct PrioritizedProblem<'a, I> {
    items: &'a [I],
    needs: f64,
    sense: Sense,
    scheme: PriorityScheme,
}

impl<'a, I: RatedItem> PrioritizedProblem<'a, I> {
    /// Allocate at most `needs` units across `items` under the default scheme
    pub fn new(items: &'a [I], needs: f64, sense: Sense) -> Self {
        Self {
            items,
            needs,
            sense,
            scheme: PriorityScheme::default(),
        }
    }

    /// Replace the priorities, weights and tolerances of the two objectives
    pub fn with_scheme(mut self, scheme: PriorityScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Populate `model`, returning the decision variables in item order
    pub fn build(&self, model: &mut Model) -> Result<Vec<Var>, ConstructionError> {
        if !(self.needs >= 0.0) {
            return Err(ConstructionError::NegativeBound {
                name: "needs".to_owned(),
                bound: self.needs,
            });
        }

        let mut assigned = LinearExpr::new();
        let mut cost = LinearExpr::new();
        let mut rate = LinearExpr::new();
        let mut vars = Vec::with_capacity(self.items.len());

        for item in self.items.iter() {
            let var = model.add_item_var(item, Domain::Continuous)?;
            assigned.add_term(1.0, var);
            cost.add_term(item.cost_coefficient(), var);
            rate.add_term(item.rate_coefficient(), var);
            vars.push(var);
        }

        model.add_constraint("needs", assigned, Relation::Le, self.needs)?;

        let PriorityScheme {
            cost: cost_tier,
            rate: rate_tier,
        } = self.scheme;
        model.set_objectives(
            self.sense,
            vec![
                ObjectiveTerm::new("cost", cost)
                    .priority(cost_tier.priority)
                    .weight(cost_tier.weight)
                    .tolerances(cost_tier.abs_tol, cost_tier.rel_tol),
                ObjectiveTerm::new("rate", rate)
                    .priority(rate_tier.priority)
                    .weight(rate_tier.weight)
                    .tolerances(rate_tier.abs_tol, rate_tier.rel_tol),
            ],
        )?;

        Ok(vars)
    }

    /// Build, solve and extract the tiered allocation
    pub async fn solve(
        &self,
        env: &Environment,
        name: &str,
    ) -> Result<TieredAllocation, AllocError> {
        let mut model = env.model(name);
        let vars = self.build(&mut model)?;

        let solved = env.optimize(model).await?.into_optimal()?;
        let quantities = solved.values(&vars)?;

        let (mut cost, mut rate) = (0.0, 0.0);
        for (term, value) in solved.objective_values()? {
            match term {
                "cost" => cost = value,
                "rate" => rate = value,
                _ => {}
            }
        }

        Ok(TieredAllocation {
            quantities,
            cost,
            rate,
        })
    }
}
