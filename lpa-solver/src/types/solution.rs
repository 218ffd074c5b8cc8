use super::{LinearExpr, ModelId, Var, VariableDef};
use crate::{AllocError, ExtractionError};

/// The terminal status of a solve that ran to completion.
///
/// Engine crashes and time limits are not statuses; they surface as
/// `AllocError::Solver` and `AllocError::Timeout` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Status {
    /// At least one optimal solution is available
    Optimal,
    /// No point satisfies the constraints
    Infeasible,
    /// The objective can be improved without limit
    Unbounded,
}

/// A model after optimization.
///
/// Values can only be read when the status is `Optimal`. If the engine
/// retained several optimal solutions, one of them is *active* at a time and
/// all reads go against it.
#[derive(Debug, Clone)]
pub struct Solved {
    pub(crate) model: ModelId,
    pub(crate) name: String,
    pub(crate) status: Status,
    pub(crate) variables: Vec<VariableDef>,
    pub(crate) pool: Vec<Vec<f64>>,
    pub(crate) active: usize,
    pub(crate) objectives: Vec<(String, LinearExpr)>,
}

impl Solved {
    /// The identity of the model that was solved
    pub fn model(&self) -> ModelId {
        self.model
    }

    /// The model's diagnostic label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the solve ended
    pub fn status(&self) -> Status {
        self.status
    }

    /// The number of solutions in the pool (0 unless optimal)
    pub fn solution_count(&self) -> usize {
        self.pool.len()
    }

    /// The index of the solution reads currently go against
    pub fn active(&self) -> usize {
        self.active
    }

    /// Make another pooled solution the active one
    pub fn select(&mut self, index: usize) -> Result<(), ExtractionError> {
        self.current()?;
        if index >= self.pool.len() {
            return Err(ExtractionError::NoSuchSolution {
                index,
                count: self.pool.len(),
            });
        }
        self.active = index;
        Ok(())
    }

    /// Turn Infeasible and Unbounded outcomes into an error
    pub fn into_optimal(self) -> Result<Self, AllocError> {
        match self.status {
            Status::Optimal => Ok(self),
            status => Err(AllocError::Infeasible {
                model: self.name,
                status,
            }),
        }
    }

    /// The value of one variable in the active solution
    pub fn value(&self, var: Var) -> Result<f64, ExtractionError> {
        let values = self.current()?;
        self.check_owner(var)?;
        Ok(values[var.index])
    }

    /// The values of `vars` in the active solution, in the same order
    pub fn values(&self, vars: &[Var]) -> Result<Vec<f64>, ExtractionError> {
        let values = self.current()?;
        vars.iter()
            .map(|&var| {
                self.check_owner(var)?;
                Ok(values[var.index])
            })
            .collect()
    }

    /// The value of the (first) objective in the active solution
    pub fn objective_value(&self) -> Result<f64, ExtractionError> {
        let values = self.current()?;
        Ok(self
            .objectives
            .first()
            .map(|(_, expr)| expr.evaluate(values))
            .unwrap_or_default())
    }

    /// Every objective term, by name, evaluated in the active solution
    pub fn objective_values(&self) -> Result<Vec<(&str, f64)>, ExtractionError> {
        let values = self.current()?;
        Ok(self
            .objectives
            .iter()
            .map(|(name, expr)| (name.as_str(), expr.evaluate(values)))
            .collect())
    }

    /// The active solution, one value per column in `Var::index` order
    pub fn solution(&self) -> Result<&[f64], ExtractionError> {
        self.current()
    }

    /// The definitions of the model's variables
    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    fn current(&self) -> Result<&[f64], ExtractionError> {
        match (self.status, self.pool.get(self.active)) {
            (Status::Optimal, Some(values)) => Ok(values),
            (status, _) => Err(ExtractionError::NotOptimal(status)),
        }
    }

    fn check_owner(&self, var: Var) -> Result<(), ExtractionError> {
        if var.model == self.model {
            Ok(())
        } else {
            Err(ExtractionError::ForeignVariable {
                expected: self.model,
                found: var.model,
            })
        }
    }
}
