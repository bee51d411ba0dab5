//! Implements a solver interface for HiGHS

use ::highs::{HighsModelStatus, RowProblem, Sense};
use nalgebra_sparse::CsrMatrix;

use crate::configuration::Configuration;
use crate::optimize::solvers::{check_status, LinearSolver, RawSolution, SolverError, StandardForm};
use crate::optimize::OptimizationStatus;

/// The HiGHS dual simplex / interior point solver
#[derive(Debug, Clone)]
pub struct HighsSolver {
    verbose: bool,
}

impl From<&Configuration> for HighsSolver {
    fn from(configuration: &Configuration) -> Self {
        HighsSolver {
            verbose: configuration.verbose,
        }
    }
}

impl LinearSolver for HighsSolver {
    fn name(&self) -> &'static str {
        "HiGHS"
    }

    fn solve(&self, problem: &StandardForm) -> Result<RawSolution, SolverError> {
        let mut lp = RowProblem::default();
        let columns: Vec<_> = problem
            .costs
            .iter()
            .map(|cost| lp.add_column(*cost, 0.0..))
            .collect();

        let rows = CsrMatrix::from(&problem.constraints);
        for (row, bound) in rows.row_iter().zip(&problem.upper_bounds) {
            let factors: Vec<_> = row
                .col_indices()
                .iter()
                .zip(row.values())
                .map(|(column, coefficient)| (columns[*column], *coefficient))
                .collect();
            lp.add_row(..=*bound, &factors);
        }

        let mut model = lp.optimise(Sense::Minimise);
        model.set_option("output_flag", self.verbose);
        let solved = model.solve();

        let status = match solved.status() {
            HighsModelStatus::Optimal => OptimizationStatus::Optimal,
            HighsModelStatus::Infeasible => OptimizationStatus::Infeasible,
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                OptimizationStatus::Unbounded
            }
            HighsModelStatus::ReachedTimeLimit | HighsModelStatus::ReachedIterationLimit => {
                OptimizationStatus::SolverHalted
            }
            other => return Err(SolverError::Backend(format!("{:?}", other))),
        };
        let status = check_status(status, self.name())?;
        let values = solved.get_solution().columns().to_vec();

        Ok(RawSolution {
            status,
            objective_value: problem.objective_at(&values),
            values,
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
        let solver = HighsSolver { verbose: false };
        let solution = solver.solve(&problem).unwrap();
        assert!((solution.objective_value + 6.8).abs() < 1e-7);
        assert!((solution.values[0] - 1.6).abs() < 1e-7);
        assert!((solution.values[1] - 1.2).abs() < 1e-7);
    }
}
