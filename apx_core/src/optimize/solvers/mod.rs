//! Interfaces to the external routines used to solve linear programs
//!
//! Every backend solves the same canonical problem, described by [`StandardForm`]:
//!
//! ```text
//! minimize    c x
//! subject to  A x <= b
//!             x >= 0
//! ```
//!
//! Translating a maximization or minimization program into this form (and back) is the
//! job of [`LinearProgram::solve`](crate::optimize::problem::LinearProgram::solve).

pub mod clarabel;
#[cfg(feature = "highs")]
pub mod highs;
#[cfg(feature = "minilp")]
pub mod microlp;

use log::warn;
use nalgebra_sparse::CscMatrix;
use thiserror::Error;

use crate::configuration::{Configuration, Solver};
use crate::optimize::OptimizationStatus;

/// A linear program in canonical form, ready to be handed to a solver
#[derive(Debug, Clone)]
pub struct StandardForm {
    /// Constraint matrix `A`, one row per constraint and one column per variable
    pub constraints: CscMatrix<f64>,
    /// Right hand side `b` of the `A x <= b` constraints
    pub upper_bounds: Vec<f64>,
    /// Cost vector `c` which is minimized
    pub costs: Vec<f64>,
}

impl StandardForm {
    pub fn num_rows(&self) -> usize {
        self.constraints.nrows()
    }

    pub fn num_columns(&self) -> usize {
        self.constraints.ncols()
    }

    /// Value of `c x` for the point `values`
    pub fn objective_at(&self, values: &[f64]) -> f64 {
        self.costs.iter().zip(values).map(|(c, x)| c * x).sum()
    }
}

/// Result of solving a [`StandardForm`] problem, before it is mapped back to names
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    /// Optimal or AlmostOptimal
    pub status: OptimizationStatus,
    /// Minimized value of `c x`
    pub objective_value: f64,
    /// Value of each variable, in column order
    pub values: Vec<f64>,
}

/// Capability of solving a linear program in canonical form
pub trait LinearSolver {
    /// Name of the solver, used in log messages
    fn name(&self) -> &'static str;

    /// Solve `problem`, returning an error for anything other than an (almost) optimal result
    fn solve(&self, problem: &StandardForm) -> Result<RawSolution, SolverError>;
}

/// Convert a status reported by a backend into either a usable status or an error
pub(crate) fn check_status(
    status: OptimizationStatus,
    solver: &str,
) -> Result<OptimizationStatus, SolverError> {
    match status {
        OptimizationStatus::Optimal => Ok(status),
        OptimizationStatus::AlmostOptimal => {
            warn!("{} only found an approximate solution", solver);
            Ok(status)
        }
        OptimizationStatus::Infeasible => Err(SolverError::Infeasible),
        OptimizationStatus::Unbounded => Err(SolverError::Unbounded),
        OptimizationStatus::NumericalError => Err(SolverError::NumericalError),
        OptimizationStatus::SolverHalted => Err(SolverError::Halted(format!(
            "{} stopped before reaching an optimum",
            solver
        ))),
    }
}

/// Create the solver selected in the global configuration
///
/// Falls back to Clarabel when the selected solver was not compiled in.
pub fn default_solver() -> Box<dyn LinearSolver> {
    let configuration = Configuration::current();
    match configuration.solver {
        Solver::Clarabel => Box::new(clarabel::ClarabelSolver::from(&configuration)),
        Solver::Microlp => microlp_solver(&configuration),
        Solver::Highs => highs_solver(&configuration),
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "minilp")] {
        fn microlp_solver(_configuration: &Configuration) -> Box<dyn LinearSolver> {
            Box::new(microlp::MicrolpSolver)
        }
    } else {
        fn microlp_solver(configuration: &Configuration) -> Box<dyn LinearSolver> {
            warn!("The minilp feature is not enabled, falling back to Clarabel");
            Box::new(clarabel::ClarabelSolver::from(configuration))
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "highs")] {
        fn highs_solver(configuration: &Configuration) -> Box<dyn LinearSolver> {
            Box::new(highs::HighsSolver::from(configuration))
        }
    } else {
        fn highs_solver(configuration: &Configuration) -> Box<dyn LinearSolver> {
            warn!("The highs feature is not enabled, falling back to Clarabel");
            Box::new(clarabel::ClarabelSolver::from(configuration))
        }
    }
}

/// Errors reported while solving a linear program
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The constraints can't all be satisfied
    #[error("The linear program is infeasible")]
    Infeasible,
    /// The objective can be improved without limit
    #[error("The linear program is unbounded")]
    Unbounded,
    #[error("The solver ran into numerical problems")]
    NumericalError,
    /// Iteration limit, time limit or lack of progress
    #[error("The solver halted: {0}")]
    Halted(String),
    #[error("Invalid solver settings: {0}")]
    InvalidSettings(String),
    /// Any other failure reported by the underlying solver
    #[error("Solver failure: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_sparse::CooMatrix;

    #[test]
    fn status_conversion() {
        assert_eq!(
            check_status(OptimizationStatus::Optimal, "test"),
            Ok(OptimizationStatus::Optimal)
        );
        assert_eq!(
            check_status(OptimizationStatus::AlmostOptimal, "test"),
            Ok(OptimizationStatus::AlmostOptimal)
        );
        assert_eq!(
            check_status(OptimizationStatus::Infeasible, "test"),
            Err(SolverError::Infeasible)
        );
        assert_eq!(
            check_status(OptimizationStatus::Unbounded, "test"),
            Err(SolverError::Unbounded)
        );
        assert!(matches!(
            check_status(OptimizationStatus::SolverHalted, "test"),
            Err(SolverError::Halted(_))
        ));
    }

    #[test]
    fn standard_form_dimensions() {
        let mut coo = CooMatrix::new(2, 3);
        coo.push(0, 0, 1.);
        coo.push(1, 2, 2.);
        let problem = StandardForm {
            constraints: CscMatrix::from(&coo),
            upper_bounds: vec![1., 2.],
            costs: vec![1., -1., 3.],
        };
        assert_eq!(problem.num_rows(), 2);
        assert_eq!(problem.num_columns(), 3);
        assert!((problem.objective_at(&[1., 2., 3.]) - 8.).abs() < 1e-12);
    }
}
