//! Module for constructing and solving linear programs

pub mod constraint;
pub mod index;
pub mod objective;
pub mod problem;
pub mod solvers;
pub mod variable;

use indexmap::IndexMap;

/// Struct representing the solution to a linear program
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// The status reported by the solver, either Optimal or AlmostOptimal
    pub status: OptimizationStatus,
    /// Optimized value of the objective, in the sense of the program that was solved
    pub objective_value: f64,
    /// Values of the variables at the optimum
    ///
    /// Keyed by variable name, covering every column of the program in column order
    pub variable_values: IndexMap<String, f64>,
}

impl LpSolution {
    /// Value of the variable `name` at the optimum
    pub fn value(&self, name: &str) -> Option<f64> {
        self.variable_values.get(name).copied()
    }

    /// Split into `(objective value, variable values)`
    pub fn into_parts(self) -> (f64, IndexMap<String, f64>) {
        (self.objective_value, self.variable_values)
    }
}

/// Status of an optimization problem
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OptimizationStatus {
    /// Problem has been optimized
    Optimal,
    /// An approximate solution has been found
    AlmostOptimal,
    /// Problem can't be optimized because objective value is not bounded
    Unbounded,
    /// Problem can't be solved because it is infeasible (conflicting constraints)
    Infeasible,
    /// A numerical error occurred during solving
    NumericalError,
    /// The solver hit the maximum allowed iterations, or max time, or made insufficient progress
    SolverHalted,
}
