//! Provides struct representing a linear program
//!
//! A [`LinearProgram`] is built incrementally from named terms. A maximization program
//! reads as `max c x s.t. A x <= b, x >= 0`, a minimization program as
//! `min b y s.t. A y >= c, y >= 0`, which is exactly the shape the dual of a maximization
//! program takes (and vice versa).
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use log::{debug, info};
use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CscMatrix};
use thiserror::Error;

use crate::io::expression::IntoTerms;
use crate::optimize::constraint::{Constraint, Triplet};
use crate::optimize::index::NameIndex;
use crate::optimize::objective::{Objective, ObjectiveSense};
use crate::optimize::solvers::{default_solver, LinearSolver, SolverError, StandardForm};
use crate::optimize::variable::Variable;
use crate::optimize::LpSolution;

/// A linear program over named, non-negative variables
#[derive(Debug, Clone)]
pub struct LinearProgram {
    /// Objective to optimize, including its sense
    objective: Objective,
    /// Non-zero entries of the constraint matrix
    triplets: Vec<Triplet>,
    /// Right hand side of each constraint, indexed by row
    bounds: Vec<f64>,
    /// Variable names and their column positions
    columns: NameIndex,
    /// Constraint names and their row positions
    rows: NameIndex,
}

impl LinearProgram {
    // region Creation Functions
    /// Create a new, empty linear program
    pub fn new(objective_sense: ObjectiveSense) -> Self {
        Self {
            objective: Objective::new(objective_sense),
            triplets: Vec::new(),
            bounds: Vec::new(),
            columns: NameIndex::new(),
            rows: NameIndex::new(),
        }
    }

    /// Create a new maximization problem
    pub fn new_maximization() -> Self {
        Self::new(ObjectiveSense::Maximize)
    }

    /// Create a new minimization problem
    pub fn new_minimization() -> Self {
        Self::new(ObjectiveSense::Minimize)
    }

    /// Create a new problem from a `"max"` or `"min"` string
    ///
    /// # Examples
    /// ```rust
    /// use apx_core::optimize::problem::LinearProgram;
    /// assert!(LinearProgram::with_sense_str("min").is_ok());
    /// assert!(LinearProgram::with_sense_str("sideways").is_err());
    /// ```
    pub fn with_sense_str(objective_sense: &str) -> Result<Self, ProblemError> {
        Ok(Self::new(objective_sense.parse()?))
    }
    // endregion Creation Functions

    // region Adding Variables
    /// Get the column of the variable `name`, creating the variable if needed
    pub fn resolve_column(&mut self, name: &str) -> usize {
        self.columns.resolve(name)
    }
    // endregion Adding Variables

    // region Adding Constraints
    /// Add a constraint to the problem
    ///
    /// The constraint reads `terms <= bound` for maximization problems and
    /// `terms >= bound` for minimization problems.
    ///
    /// # Parameters
    /// - `terms`: Either an expression string such as `"x + 2y"`, or already parsed
    ///     `(name, coefficient)` pairs (see [`IntoTerms`])
    /// - `bound`: Right hand side of the constraint
    /// - `name`: Name of the constraint, if None a name of the form `y<i>` is generated
    ///
    /// # Returns
    /// The row of the new constraint, or [`ProblemError::DuplicateConstraintName`] if the
    /// name is already taken, in which case the problem is left unchanged.
    ///
    /// # Examples
    /// ```rust
    /// use apx_core::optimize::problem::LinearProgram;
    /// let mut lp = LinearProgram::new_maximization();
    /// lp.add_constraint("x + 2y", 4., None).unwrap();
    /// lp.add_constraint([("x", 3.), ("y", 1.)], 6., Some("second")).unwrap();
    /// assert_eq!(lp.row_name(0), Some("y1"));
    /// assert_eq!(lp.row_index("second"), Some(1));
    /// assert!(lp.add_constraint("x", 1., Some("second")).is_err());
    /// ```
    pub fn add_constraint<T: IntoTerms>(
        &mut self,
        terms: T,
        bound: f64,
        name: Option<&str>,
    ) -> Result<usize, ProblemError> {
        let name = match name {
            Some(name) => {
                if self.rows.contains(name) {
                    return Err(ProblemError::DuplicateConstraintName(name.to_string()));
                }
                name.to_string()
            }
            None => self.generate_constraint_name(),
        };
        let terms = terms.into_terms();
        let row = self.rows.len();
        self.bounds.push(bound);
        for (variable, weight) in &terms {
            let column = self.columns.resolve(variable);
            self.triplets.push(Triplet::new(row, column, *weight));
        }
        let row = self.rows.resolve(&name);
        debug!(
            "Added constraint {} (row {}) with {} terms and bound {}",
            name,
            row,
            terms.len(),
            bound
        );
        Ok(row)
    }

    /// Find the first unused name `y<i>`, starting from the number of rows plus one
    fn generate_constraint_name(&self) -> String {
        let mut i = self.rows.len() + 1;
        loop {
            let candidate = format!("y{}", i);
            if !self.rows.contains(&candidate) {
                return candidate;
            }
            i += 1;
        }
    }
    // endregion Adding Constraints

    // region Objective
    /// Replace the objective of the problem
    ///
    /// Every name in `terms` becomes a variable, even if its coefficient is 0. The stored
    /// objective covers every column known after this call, with 0.0 for columns that are
    /// not mentioned.
    pub fn set_objective<T: IntoTerms>(&mut self, terms: T) {
        let terms = terms.into_terms();
        for variable in terms.keys() {
            self.columns.resolve(variable);
        }
        let coefficients = self
            .columns
            .names()
            .map(|variable| terms.get(variable).copied().unwrap_or(0.))
            .collect::<Vec<f64>>();
        debug!(
            "Set objective over {} columns ({} terms)",
            coefficients.len(),
            terms.len()
        );
        self.objective.set_coefficients(coefficients);
    }

    /// Change whether the objective is maximized or minimized
    pub fn update_objective_sense(&mut self, sense: ObjectiveSense) {
        let coefficients = self.objective.coefficients().to_vec();
        self.objective = Objective::from_coefficients(sense, coefficients);
    }
    // endregion Objective

    // region Accessors
    pub fn sense(&self) -> ObjectiveSense {
        self.objective.sense()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Non-zero entries of the constraint matrix, in insertion order
    pub fn triplets(&self) -> &[Triplet] {
        &self.triplets
    }

    /// Right hand side of every constraint, indexed by row
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Objective coefficient for every current column
    pub fn objective(&self) -> Vec<f64> {
        self.objective.dense(self.num_columns())
    }

    /// Names of the variables, by column
    pub fn columns(&self) -> &NameIndex {
        &self.columns
    }

    /// Names of the constraints, by row
    pub fn rows(&self) -> &NameIndex {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.index_of(name)
    }

    pub fn column_name(&self, column: usize) -> Option<&str> {
        self.columns.name_of(column)
    }

    pub fn row_index(&self, name: &str) -> Option<usize> {
        self.rows.index_of(name)
    }

    pub fn row_name(&self, row: usize) -> Option<&str> {
        self.rows.name_of(row)
    }

    /// All variables, in column order
    pub fn variables(&self) -> Vec<Variable> {
        self.columns
            .iter()
            .map(|(index, name)| Variable::new(name, index))
            .collect()
    }

    /// View of the constraint at `row`
    pub fn constraint(&self, row: usize) -> Option<Constraint> {
        let name = self.rows.name_of(row)?;
        let terms = self
            .triplets
            .iter()
            .filter(|triplet| triplet.row == row)
            .filter_map(|triplet| {
                self.columns
                    .name_of(triplet.column)
                    .map(|variable| (variable.to_string(), triplet.weight))
            })
            .collect::<IndexMap<String, f64>>();
        Some(Constraint {
            index: row,
            name: name.to_string(),
            bound: self.bounds[row],
            terms,
            sense: self.sense(),
        })
    }

    /// Views of all constraints, in row order
    pub fn constraints(&self) -> Vec<Constraint> {
        (0..self.num_rows())
            .filter_map(|row| self.constraint(row))
            .collect()
    }

    /// Constraint matrix assembled from the triplets
    pub fn constraint_matrix(&self) -> CooMatrix<f64> {
        let mut matrix = CooMatrix::new(self.num_rows(), self.num_columns());
        for triplet in &self.triplets {
            matrix.push(triplet.row, triplet.column, triplet.weight);
        }
        matrix
    }

    /// Dense constraint matrix, rows by columns
    pub fn dense_matrix(&self) -> DMatrix<f64> {
        DMatrix::from(&self.constraint_matrix())
    }
    // endregion Accessors

    // region Duality
    /// Create the dual of this problem
    ///
    /// The constraint matrix is transposed, bounds and objective trade places, and the
    /// sense is flipped. Dual variables are named after the constraints of this problem
    /// and dual constraints after its variables. The returned problem shares no state with
    /// `self`.
    ///
    /// # Examples
    /// ```rust
    /// use apx_core::optimize::objective::ObjectiveSense;
    /// use apx_core::optimize::problem::LinearProgram;
    /// let mut primal = LinearProgram::new_maximization();
    /// primal.add_constraint("x + 2y", 4., Some("first")).unwrap();
    /// primal.set_objective("2x + 3y");
    /// let dual = primal.dual();
    /// assert_eq!(dual.sense(), ObjectiveSense::Minimize);
    /// assert_eq!(dual.column_index("first"), Some(0));
    /// assert_eq!(dual.row_index("y"), Some(1));
    /// assert_eq!(dual.bounds(), &[2., 3.]);
    /// assert_eq!(dual.objective(), vec![4.]);
    /// ```
    pub fn dual(&self) -> LinearProgram {
        LinearProgram {
            objective: Objective::from_coefficients(self.sense().flipped(), self.bounds.clone()),
            triplets: self.triplets.iter().map(|t| t.transposed()).collect(),
            bounds: self.objective(),
            columns: self.rows.clone(),
            rows: self.columns.clone(),
        }
    }
    // endregion Duality

    // region Solving
    /// Translate the problem into the canonical `min c x s.t. A x <= b, x >= 0` form
    ///
    /// Maximization problems have their objective negated, minimization problems have
    /// their `>=` constraints negated into `<=` constraints.
    pub fn standard_form(&self) -> StandardForm {
        let sign = self.sense().sign();
        let mut matrix = CooMatrix::new(self.num_rows(), self.num_columns());
        for triplet in &self.triplets {
            matrix.push(triplet.row, triplet.column, -sign * triplet.weight);
        }
        StandardForm {
            constraints: CscMatrix::from(&matrix),
            upper_bounds: self.bounds.iter().map(|b| -sign * b).collect(),
            costs: self.objective().iter().map(|c| sign * c).collect(),
        }
    }

    /// Solve the problem with the solver selected in the global configuration
    ///
    /// # Examples
    /// ```rust
    /// use apx_core::optimize::problem::LinearProgram;
    /// let mut lp = LinearProgram::new_maximization();
    /// lp.add_constraint("x + 2y", 4., None).unwrap();
    /// lp.add_constraint("3x + y", 6., None).unwrap();
    /// lp.set_objective("2x + 3y");
    /// let solution = lp.solve().unwrap();
    /// assert!((solution.objective_value - 6.8).abs() < 1e-5);
    /// assert!((solution.value("x").unwrap() - 1.6).abs() < 1e-5);
    /// ```
    pub fn solve(&self) -> Result<LpSolution, ProblemError> {
        let solver = default_solver();
        self.solve_with(solver.as_ref())
    }

    /// Solve the problem with a specific solver
    ///
    /// Only the objective value is sign-adjusted for maximization; variable values are
    /// reported in the caller's own variable space.
    pub fn solve_with(&self, solver: &dyn LinearSolver) -> Result<LpSolution, ProblemError> {
        let sign = self.sense().sign();
        let problem = self.standard_form();
        debug!(
            "Solving {} problem with {} rows and {} columns using {}",
            self.sense(),
            problem.num_rows(),
            problem.num_columns(),
            solver.name()
        );
        let raw = solver.solve(&problem)?;
        let variable_values = self
            .columns
            .iter()
            .map(|(column, name)| match raw.values.get(column) {
                Some(value) => Ok((name.to_string(), *value)),
                None => Err(SolverError::Backend(format!(
                    "{} returned no value for column {}",
                    solver.name(),
                    column
                ))),
            })
            .collect::<Result<IndexMap<String, f64>, SolverError>>()?;
        let objective_value = sign * raw.objective_value;
        info!(
            "{} found {:?} solution with objective value {}",
            solver.name(),
            raw.status,
            objective_value
        );
        Ok(LpSolution {
            status: raw.status,
            objective_value,
            variable_values,
        })
    }
    // endregion Solving
}

impl Default for LinearProgram {
    fn default() -> Self {
        Self::new_maximization()
    }
}

impl Display for LinearProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let matrix = self.dense_matrix();
        match self.sense() {
            ObjectiveSense::Maximize => {
                writeln!(f, "Maximize c x under A x <= b, x >= 0, where")?;
                writeln!(f, "A={}", matrix)?;
                writeln!(f, "b={:?}", self.bounds)?;
                write!(f, "c={:?}", self.objective())
            }
            ObjectiveSense::Minimize => {
                writeln!(f, "Minimize b y under A y >= c, y >= 0, where")?;
                writeln!(f, "A={}", matrix)?;
                writeln!(f, "b={:?}", self.objective())?;
                write!(f, "c={:?}", self.bounds)
            }
        }
    }
}

/// Errors associated with the LinearProgram
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// Error when trying to add a constraint with the same name as an existing constraint
    #[error("Tried to add a constraint named {0}, but a constraint with that name already exists")]
    DuplicateConstraintName(String),
    /// Error when an objective sense other than max or min is requested
    #[error("Unknown objective type: {0} (expected \"max\" or \"min\")")]
    UnknownObjectiveSense(String),
    /// Error reported by the solver
    #[error("Unable to solve the linear program: {0}")]
    Solver(#[from] SolverError),
}
