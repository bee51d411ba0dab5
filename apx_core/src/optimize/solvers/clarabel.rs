//! Implements a solver interface for Clarabel

use ::clarabel::algebra::CscMatrix;
use ::clarabel::solver::implementations::default::DefaultSettingsBuilder;
use ::clarabel::solver::SupportedConeT::NonnegativeConeT;
use ::clarabel::solver::{DefaultSolver, IPSolver, SolverStatus};
use derive_builder::Builder;
use log::debug;

use crate::configuration::Configuration;
use crate::optimize::solvers::{check_status, LinearSolver, RawSolution, SolverError, StandardForm};
use crate::optimize::OptimizationStatus;

/// The Clarabel interior point solver
///
/// # Examples
/// ```rust
/// use apx_core::optimize::solvers::clarabel::ClarabelSolverBuilder;
/// let solver = ClarabelSolverBuilder::default()
///     .tolerance(1e-9)
///     .max_iter(500u32)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClarabelSolver {
    /// Print solver progress
    #[builder(default = "false")]
    verbose: bool,
    /// Feasibility and duality gap tolerance
    #[builder(default = "1e-8")]
    tolerance: f64,
    /// Maximum number of interior point iterations
    #[builder(default = "200")]
    max_iter: u32,
}

impl Default for ClarabelSolver {
    fn default() -> Self {
        ClarabelSolver::from(&Configuration::current())
    }
}

impl From<&Configuration> for ClarabelSolver {
    fn from(configuration: &Configuration) -> Self {
        ClarabelSolver {
            verbose: configuration.verbose,
            tolerance: configuration.tolerance,
            max_iter: configuration.max_iter,
        }
    }
}

impl ClarabelSolver {
    /// Stack `A` on top of `-I`, so that `x >= 0` becomes `-x <= 0` in the same nonnegative cone
    fn constraint_matrix(problem: &StandardForm) -> CscMatrix<f64> {
        let num_rows = problem.num_rows();
        let num_columns = problem.num_columns();
        let nnz = problem.constraints.nnz() + num_columns;
        let mut colptr = Vec::with_capacity(num_columns + 1);
        let mut rowval = Vec::with_capacity(nnz);
        let mut nzval = Vec::with_capacity(nnz);
        colptr.push(0);
        for column in 0..num_columns {
            let lane = problem.constraints.col(column);
            rowval.extend_from_slice(lane.row_indices());
            nzval.extend_from_slice(lane.values());
            rowval.push(num_rows + column);
            nzval.push(-1.);
            colptr.push(rowval.len());
        }
        CscMatrix::new(num_rows + num_columns, num_columns, colptr, rowval, nzval)
    }

    fn convert_status(status: SolverStatus) -> OptimizationStatus {
        match status {
            SolverStatus::Solved => OptimizationStatus::Optimal,
            SolverStatus::AlmostSolved => OptimizationStatus::AlmostOptimal,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                OptimizationStatus::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                OptimizationStatus::Unbounded
            }
            SolverStatus::NumericalError => OptimizationStatus::NumericalError,
            SolverStatus::Unsolved
            | SolverStatus::MaxIterations
            | SolverStatus::MaxTime
            | SolverStatus::InsufficientProgress => OptimizationStatus::SolverHalted,
        }
    }
}

impl LinearSolver for ClarabelSolver {
    fn name(&self) -> &'static str {
        "Clarabel"
    }

    fn solve(&self, problem: &StandardForm) -> Result<RawSolution, SolverError> {
        let num_columns = problem.num_columns();
        let num_cone_rows = problem.num_rows() + num_columns;
        if num_cone_rows == 0 {
            debug!("Nothing to hand to Clarabel, the problem is empty");
            return Ok(RawSolution {
                status: OptimizationStatus::Optimal,
                objective_value: 0.,
                values: Vec::new(),
            });
        }

        let quadratic_objective = CscMatrix::zeros((num_columns, num_columns));
        let constraints = Self::constraint_matrix(problem);
        let mut constraint_values = problem.upper_bounds.clone();
        constraint_values.resize(num_cone_rows, 0.);
        let cones = [NonnegativeConeT(num_cone_rows)];

        let mut settings = DefaultSettingsBuilder::<f64>::default();
        settings
            .verbose(self.verbose)
            .max_iter(self.max_iter)
            .tol_feas(self.tolerance)
            .tol_gap_abs(self.tolerance)
            .tol_gap_rel(self.tolerance);
        let settings = settings
            .build()
            .map_err(|e| SolverError::InvalidSettings(e.to_string()))?;

        debug!(
            "Handing {} constraints over {} variables to Clarabel",
            num_cone_rows, num_columns
        );
        let mut solver = DefaultSolver::new(
            &quadratic_objective,
            &problem.costs,
            &constraints,
            &constraint_values,
            &cones,
            settings,
        );
        solver.solve();

        let status = check_status(
            Self::convert_status(solver.solution.status),
            self.name(),
        )?;
        Ok(RawSolution {
            status,
            objective_value: solver.solution.obj_val,
            values: solver.solution.x.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_sparse::{CooMatrix, CscMatrix as SparseCsc};

    fn standard_form(rows: &[&[f64]], upper_bounds: &[f64], costs: &[f64]) -> StandardForm {
        let mut coo = CooMatrix::new(rows.len(), costs.len());
        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                if *value != 0. {
                    coo.push(i, j, *value);
                }
            }
        }
        StandardForm {
            constraints: SparseCsc::from(&coo),
            upper_bounds: upper_bounds.to_vec(),
            costs: costs.to_vec(),
        }
    }

    #[test]
    fn stacked_constraint_matrix() {
        let problem = standard_form(&[&[0., 1.], &[3., 4.]], &[1., 2.], &[1., 1.]);
        let matrix = ClarabelSolver::constraint_matrix(&problem);
        assert_eq!(matrix.m, 4);
        assert_eq!(matrix.n, 2);
        assert_eq!(matrix.get_entry((0, 0)), None);
        assert_eq!(matrix.get_entry((0, 1)), Some(1.));
        assert_eq!(matrix.get_entry((1, 0)), Some(3.));
        assert_eq!(matrix.get_entry((1, 1)), Some(4.));
        assert_eq!(matrix.get_entry((2, 0)), Some(-1.));
        assert_eq!(matrix.get_entry((3, 1)), Some(-1.));
        assert_eq!(matrix.get_entry((3, 0)), None);
    }

    #[test]
    fn solve_small_problem() {
        // minimize -2x - 3y s.t. x + 2y <= 4, 3x + y <= 6
        let problem = standard_form(&[&[1., 2.], &[3., 1.]], &[4., 6.], &[-2., -3.]);
        let solver = ClarabelSolverBuilder::default().build().unwrap();
        let solution = solver.solve(&problem).unwrap();
        assert!((solution.objective_value + 6.8).abs() < 1e-5);
        assert!((solution.values[0] - 1.6).abs() < 1e-5);
        assert!((solution.values[1] - 1.2).abs() < 1e-5);
    }

    #[test]
    fn empty_problem() {
        let problem = standard_form(&[], &[], &[]);
        let solver = ClarabelSolverBuilder::default().build().unwrap();
        let solution = solver.solve(&problem).unwrap();
        assert_eq!(solution.status, OptimizationStatus::Optimal);
        assert_eq!(solution.objective_value, 0.);
        assert!(solution.values.is_empty());
    }

    #[test]
    fn infeasible_problem() {
        // x <= -1 with x >= 0
        let problem = standard_form(&[&[1.]], &[-1.], &[1.]);
        let solver = ClarabelSolverBuilder::default().build().unwrap();
        assert_eq!(solver.solve(&problem), Err(SolverError::Infeasible));
    }

    #[test]
    fn unbounded_problem() {
        // minimize -x with only x - y <= 1
        let problem = standard_form(&[&[1., -1.]], &[1.], &[-1., 0.]);
        let solver = ClarabelSolverBuilder::default().build().unwrap();
        assert_eq!(solver.solve(&problem), Err(SolverError::Unbounded));
    }
}
