use super::{
    Constraint, Domain, LinearExpr, ModelId, Objective, ObjectiveTerm, Relation, Sense, Var,
    VariableDef,
};
use crate::{ConstructionError, Set};
use lpa_core::models::AllocatableItem;
use tracing::{Level, event};

/// A linear model under construction.
///
/// The model owns every variable, constraint and objective of one solve. It
/// is populated through the methods below, each of which validates its input
/// immediately, and is then consumed by `Environment::optimize`. A model is
/// never reused: build a fresh one for every problem.
#[derive(Debug)]
pub struct Model {
    pub(crate) id: ModelId,
    pub(crate) name: String,
    pub(crate) variables: Vec<VariableDef>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Option<Objective>,
    variable_names: Set<String>,
    constraint_names: Set<String>,
}

impl Model {
    /// Create an empty model. The name is a diagnostic label only.
    pub fn new(name: impl Into<String>) -> Self {
        let model = Self {
            id: ModelId::next(),
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
            variable_names: Set::default(),
            constraint_names: Set::default(),
        };
        event!(Level::TRACE, model = %model.id, label = %model.name, "created model");
        model
    }

    /// The process-unique identity stamped on every variable of this model
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// The diagnostic label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable declarations, indexed by `Var::index`
    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    /// Constraints in the order they were added
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The objective, once one has been set
    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    /// Declare a variable `0 <= x <= upper`.
    ///
    /// `upper` may be infinite, but a negative (or NaN) capacity is rejected
    /// rather than clamped.
    pub fn add_var(
        &mut self,
        name: impl Into<String>,
        domain: Domain,
        upper: f64,
    ) -> Result<Var, ConstructionError> {
        let name = name.into();

        // written so that NaN fails too
        if !(upper >= 0.0) {
            return Err(ConstructionError::NegativeCapacity {
                name,
                capacity: upper,
            });
        }

        if !self.variable_names.insert(name.clone()) {
            return Err(ConstructionError::DuplicateVariable(name));
        }

        let var = Var {
            model: self.id,
            index: self.variables.len(),
        };
        self.variables.push(VariableDef {
            name,
            domain,
            lower: 0.0,
            upper,
        });
        Ok(var)
    }

    /// Declare a variable bounded by an item's capacity, named by its key.
    pub fn add_item_var<I: AllocatableItem>(
        &mut self,
        item: &I,
        domain: Domain,
    ) -> Result<Var, ConstructionError> {
        self.add_var(item.key().to_string(), domain, item.capacity())
    }

    /// Attach the named constraint `expr ⋈ bound`.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        bound: f64,
    ) -> Result<(), ConstructionError> {
        let name = name.into();
        self.check_expr(&name, &expr)?;

        if !bound.is_finite() {
            return Err(ConstructionError::InvalidBound { name, bound });
        }

        if !self.constraint_names.insert(name.clone()) {
            return Err(ConstructionError::DuplicateConstraint(name));
        }

        self.constraints.push(Constraint {
            name,
            expr,
            relation,
            bound,
        });
        Ok(())
    }

    /// Optimize a single expression.
    pub fn set_objective(&mut self, expr: LinearExpr, sense: Sense) -> Result<(), ConstructionError> {
        self.check_objective("objective", &expr)?;
        self.objective = Some(Objective::Single { expr, sense });
        Ok(())
    }

    /// Optimize several expressions in priority tiers, all under one sense.
    pub fn set_objectives(
        &mut self,
        sense: Sense,
        terms: Vec<ObjectiveTerm>,
    ) -> Result<(), ConstructionError> {
        if terms.is_empty() {
            return Err(ConstructionError::EmptyObjective("objectives".to_owned()));
        }

        let mut names = Set::default();
        for term in terms.iter() {
            self.check_objective(&term.name, &term.expr)?;
            if !term.weight.is_finite() {
                return Err(ConstructionError::NonFiniteCoefficient(term.name.clone()));
            }
            for (tol, name) in [(term.abs_tol, "abs_tol"), (term.rel_tol, "rel_tol")] {
                if !(tol >= 0.0 && tol.is_finite()) {
                    return Err(ConstructionError::InvalidBound {
                        name: format!("{}.{name}", term.name),
                        bound: tol,
                    });
                }
            }
            if !names.insert(term.name.as_str()) {
                return Err(ConstructionError::DuplicateConstraint(term.name.clone()));
            }
        }

        self.objective = Some(Objective::Hierarchical { sense, terms });
        Ok(())
    }

    /// Final checks before submission
    pub fn validate(&self) -> Result<(), ConstructionError> {
        match self.objective {
            Some(_) => Ok(()),
            None => Err(ConstructionError::MissingObjective),
        }
    }

    fn check_objective(&self, name: &str, expr: &LinearExpr) -> Result<(), ConstructionError> {
        if expr.is_empty() {
            return Err(ConstructionError::EmptyObjective(name.to_owned()));
        }
        self.check_expr(name, expr)
    }

    fn check_expr(&self, name: &str, expr: &LinearExpr) -> Result<(), ConstructionError> {
        let Some(&(first, _)) = expr.terms().first() else {
            return Err(ConstructionError::EmptyExpression(name.to_owned()));
        };

        // the first term is checked for ownership before its domain is read
        for &(var, coef) in expr.terms() {
            if var.model != self.id {
                return Err(ConstructionError::ForeignVariable {
                    name: name.to_owned(),
                    expected: self.id,
                    found: var.model,
                });
            }
            if !coef.is_finite() {
                return Err(ConstructionError::NonFiniteCoefficient(name.to_owned()));
            }
            if self.variables[var.index].domain != self.variables[first.index].domain {
                return Err(ConstructionError::MixedDomain(name.to_owned()));
            }
        }

        Ok(())
    }
}
