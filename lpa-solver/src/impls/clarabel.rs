use crate::{Engine, EngineError, EngineOutcome, Program, Relation, Sense};
use clarabel::{algebra::*, solver::*};

/// An engine backed by the Clarabel interior point solver.
///
/// Clarabel solves conic programs, of which linear programs are the simplest
/// case. It has no integer support, so models with integer columns are
/// rejected rather than silently relaxed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarabelEngine;

impl ClarabelEngine {
    const NAME: &'static str = "clarabel";
}

impl Engine for ClarabelEngine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn solve(&self, program: &Program<'_>) -> Result<EngineOutcome, EngineError> {
        if program.has_integers() {
            return Err(EngineError::Unsupported {
                engine: Self::NAME,
                reason: "integer variables are not supported".to_owned(),
            });
        }

        let n = program.variables.len();

        // Clarabel always minimizes, so a maximization flips the objective
        let flip = match program.sense {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        };
        let q = program
            .objective
            .iter()
            .map(|coef| flip * coef)
            .collect::<Vec<_>>();

        // Clarabel handles constraints via a cone specification, Ax + s = b.
        // We put every equality row first (s in the zero cone) and follow with
        // the inequalities (s >= 0), which is also where the bounds go.
        let mut rows: Vec<Vec<(usize, f64)>> = Vec::new();
        let mut b = Vec::new();

        for row in program.constraints.iter() {
            if row.relation == Relation::Eq {
                rows.push(sparse_row(row.expr.terms(), 1.0));
                b.push(row.bound);
            }
        }
        let nzero = rows.len();

        for row in program.constraints.iter() {
            match row.relation {
                Relation::Le => {
                    rows.push(sparse_row(row.expr.terms(), 1.0));
                    b.push(row.bound);
                }
                Relation::Ge => {
                    rows.push(sparse_row(row.expr.terms(), -1.0));
                    b.push(-row.bound);
                }
                Relation::Eq => {}
            }
        }

        // The signs on the lower bound are wonky because we have to use s>=0 as
        // the cone specification.
        for (column, var) in program.variables.iter().enumerate() {
            rows.push(vec![(column, -1.0)]);
            b.push(-var.lower);
            if var.upper.is_finite() {
                rows.push(vec![(column, 1.0)]);
                b.push(var.upper);
            }
        }

        let a_matrix = to_csc(&rows, n);

        let mut cones = Vec::new();
        if nzero > 0 {
            cones.push(ZeroConeT(nzero));
        }
        cones.push(NonnegativeConeT(rows.len() - nzero));

        // The objective is linear, so P is the empty n x n matrix
        let p_matrix = CscMatrix {
            m: n,
            n,
            colptr: vec![0; n + 1],
            rowval: Vec::new(),
            nzval: Vec::new(),
        };

        let mut settings = DefaultSettings::default();
        settings.verbose = program.verbose;
        if let Some(limit) = program.time_limit {
            settings.time_limit = limit.as_secs_f64();
        }

        let mut solver = DefaultSolver::new(&p_matrix, &q, &a_matrix, &b, &cones, settings)
            .map_err(|error| EngineError::Internal {
                engine: Self::NAME,
                reason: format!("{error:?}"),
            })?;
        solver.solve();

        match solver.solution.status {
            SolverStatus::Solved | SolverStatus::AlmostSolved => {
                Ok(EngineOutcome::Optimal(solver.solution.x.clone()))
            }
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                Ok(EngineOutcome::Infeasible)
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                Ok(EngineOutcome::Unbounded)
            }
            SolverStatus::MaxTime => Ok(EngineOutcome::TimeLimit),
            status => Err(EngineError::Internal {
                engine: Self::NAME,
                reason: format!("terminated with status {status:?}"),
            }),
        }
    }
}

fn sparse_row(terms: &[(crate::Var, f64)], scale: f64) -> Vec<(usize, f64)> {
    terms
        .iter()
        .map(|&(var, coef)| (var.index(), scale * coef))
        .collect()
}

// Clarabel's matrix input is in the form of CSC, so we transpose the rows
// here, merging repeated columns within a row.
fn to_csc(rows: &[Vec<(usize, f64)>], n: usize) -> CscMatrix<f64> {
    let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for (r, row) in rows.iter().enumerate() {
        for &(column, value) in row.iter() {
            let entries = &mut columns[column];
            match entries.last_mut() {
                Some((last, acc)) if *last == r => *acc += value,
                _ => entries.push((r, value)),
            }
        }
    }

    let mut colptr = Vec::with_capacity(n + 1);
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();
    for entries in columns.into_iter() {
        colptr.push(rowval.len());
        for (r, value) in entries {
            rowval.push(r);
            nzval.push(value);
        }
    }
    colptr.push(rowval.len());

    CscMatrix {
        m: rows.len(),
        n,
        colptr,
        rowval,
        nzval,
    }
}
