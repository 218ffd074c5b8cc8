use crate::{
    AllocError, ConstructionError, Domain, Environment, LinearExpr, Model, Relation, Sense, Var,
};
use lpa_core::models::AllocatableItem;

/// Split a total return quantity across items, maximizing the total
/// cost-weighted amount returned.
///
/// Every item receives a whole number of units between zero and its capacity,
/// and the units handed out never exceed `total_return`. This is a knapsack
/// with unit weights, so the items with the largest coefficients fill first.
#[derive(Debug, Clone)]
pub struct ReturnsProblem<'a, I> {
    items: &'a [I],
    total_return: f64,
}

impl<'a, I: AllocatableItem> ReturnsProblem<'a, I> {
    /// Allocate at most `total_return` units across `items`
    pub fn new(items: &'a [I], total_return: f64) -> Self {
        Self {
            items,
            total_return,
        }
    }

    /// Populate `model`, returning the decision variables in item order
    pub fn build(&self, model: &mut Model) -> Result<Vec<Var>, ConstructionError> {
        if !(self.total_return >= 0.0) {
            return Err(ConstructionError::NegativeBound {
                name: "total_return".to_owned(),
                bound: self.total_return,
            });
        }

        let mut assigned = LinearExpr::new();
        let mut value = LinearExpr::new();
        let mut vars = Vec::with_capacity(self.items.len());

        for item in self.items.iter() {
            let var = model.add_item_var(item, Domain::Integer)?;
            assigned.add_term(1.0, var);
            value.add_term(item.cost_coefficient(), var);
            vars.push(var);
        }

        model.add_constraint("total_return", assigned, Relation::Le, self.total_return)?;
        model.set_objective(value, Sense::Maximize)?;

        Ok(vars)
    }

    /// Build, solve and extract the quantity assigned to each item
    pub async fn solve(&self, env: &Environment, name: &str) -> Result<Vec<u64>, AllocError> {
        let mut model = env.model(name);
        let vars = self.build(&mut model)?;

        let solved = env.optimize(model).await?.into_optimal()?;

        // integer columns are already rounded and clamped to [0, capacity]
        Ok(solved
            .values(&vars)?
            .into_iter()
            .map(|quantity| quantity as u64)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpa_core::models::Trade;

    #[test]
    fn builds_one_integer_variable_per_item() {
        let trades = vec![
            Trade::new("T1", 10.0, 1.0, 0.0),
            Trade::new("T2", 20.0, 2.0, 0.0),
        ];
        let mut model = Model::new("returns");
        let vars = ReturnsProblem::new(&trades, 15.0).build(&mut model).unwrap();

        assert_eq!(vars.len(), 2);
        assert!(model
            .variables()
            .iter()
            .all(|var| var.domain == Domain::Integer));
        assert_eq!(model.constraints().len(), 1);
        assert_eq!(model.constraints()[0].relation, Relation::Le);
        assert_eq!(model.constraints()[0].bound, 15.0);
    }

    #[test]
    fn rejects_negative_totals_and_empty_inputs() {
        let trades = vec![Trade::new("T1", 10.0, 1.0, 0.0)];
        let err = ReturnsProblem::new(&trades, -1.0)
            .build(&mut Model::new("returns"))
            .unwrap_err();
        assert!(matches!(err, ConstructionError::NegativeBound { .. }));

        let err = ReturnsProblem::<Trade>::new(&[], 10.0)
            .build(&mut Model::new("returns"))
            .unwrap_err();
        assert_eq!(
            err,
            ConstructionError::EmptyExpression("total_return".to_owned())
        );
    }
}
