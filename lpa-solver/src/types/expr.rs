use super::Var;

/// A weighted sum of decision variables, built up one term at a time.
///
/// Terms are kept in insertion order and repeated variables are not merged;
/// the value of the sum does not depend on either. Attaching an expression to a
/// constraint or an objective moves it into the model, after which it can no
/// longer change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(Var, f64)>,
}

impl LinearExpr {
    /// An expression with no terms
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `coefficient * var` to the sum
    pub fn add_term(&mut self, coefficient: f64, var: Var) -> &mut Self {
        self.terms.push((var, coefficient));
        self
    }

    /// Append every term of `other`, scaled by `scale`
    pub fn add_scaled(&mut self, scale: f64, other: &LinearExpr) -> &mut Self {
        self.terms
            .extend(other.terms.iter().map(|&(var, coef)| (var, scale * coef)));
        self
    }

    /// The terms in insertion order
    pub fn terms(&self) -> &[(Var, f64)] {
        &self.terms
    }

    /// The number of terms, repeats included
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term has been added
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate the sum against a dense vector of column values
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values[var.index])
            .sum()
    }

    /// Scatter the coefficients into a dense vector, summing repeated columns
    pub(crate) fn accumulate_into(&self, dense: &mut [f64], scale: f64) {
        for &(var, coef) in self.terms.iter() {
            dense[var.index] += scale * coef;
        }
    }
}

impl FromIterator<(Var, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (Var, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Var, f64)> for LinearExpr {
    fn extend<I: IntoIterator<Item = (Var, f64)>>(&mut self, iter: I) {
        self.terms.extend(iter)
    }
}
