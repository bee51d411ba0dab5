//! Implements a solver interface for microlp

use ::microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};
use nalgebra_sparse::CsrMatrix;

use crate::optimize::solvers::{LinearSolver, RawSolution, SolverError, StandardForm};
use crate::optimize::OptimizationStatus;

/// The microlp dense simplex solver
///
/// microlp has no settings, the configured tolerance and iteration limit are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl LinearSolver for MicrolpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, problem: &StandardForm) -> Result<RawSolution, SolverError> {
        let mut lp = Problem::new(OptimizationDirection::Minimize);
        let variables: Vec<_> = problem
            .costs
            .iter()
            .map(|cost| lp.add_var(*cost, (0., f64::INFINITY)))
            .collect();

        let rows = CsrMatrix::from(&problem.constraints);
        for (row, bound) in rows.row_iter().zip(&problem.upper_bounds) {
            let mut expression = LinearExpr::empty();
            for (column, coefficient) in row.col_indices().iter().zip(row.values()) {
                expression.add(variables[*column], *coefficient);
            }
            lp.add_constraint(expression, ComparisonOp::Le, *bound);
        }

        let solution = lp.solve().map_err(|e| match e {
            ::microlp::Error::Infeasible => SolverError::Infeasible,
            ::microlp::Error::Unbounded => SolverError::Unbounded,
            #[allow(unreachable_patterns)]
            other => SolverError::Backend(other.to_string()),
        })?;

        Ok(RawSolution {
            status: OptimizationStatus::Optimal,
            objective_value: solution.objective(),
            values: variables.iter().map(|var| solution[*var]).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_sparse::{CooMatrix, CscMatrix};

    #[test]
    fn solve_small_problem() {
        let mut coo = CooMatrix::new(2, 2);
        coo.push(0, 0, 1.);
        coo.push(0, 1, 2.);
        coo.push(1, 0, 3.);
        coo.push(1, 1, 1.);
        let problem = StandardForm {
            constraints: CscMatrix::from(&coo),
            upper_bounds: vec![4., 6.],
            costs: vec![-2., -3.],
        };
        let solution = MicrolpSolver.solve(&problem).unwrap();
        assert!((solution.objective_value + 6.8).abs() < 1e-9);
        assert!((solution.values[0] - 1.6).abs() < 1e-9);
        assert!((solution.values[1] - 1.2).abs() < 1e-9);
    }
}
