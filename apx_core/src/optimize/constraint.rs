//! Provides structs for representing the constraints of a linear program
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::optimize::objective::ObjectiveSense;

/// A single non-zero entry of the constraint matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triplet {
    /// Row (constraint) position
    pub row: usize,
    /// Column (variable) position
    pub column: usize,
    /// Coefficient at (`row`, `column`)
    pub weight: f64,
}

impl Triplet {
    pub fn new(row: usize, column: usize, weight: f64) -> Self {
        Self {
            row,
            column,
            weight,
        }
    }

    /// The same entry in the transposed matrix
    pub fn transposed(self) -> Self {
        Self {
            row: self.column,
            column: self.row,
            weight: self.weight,
        }
    }
}

/// Read-only view of one constraint of a [`LinearProgram`](crate::optimize::problem::LinearProgram)
///
/// Constraints are never stored individually, this view is assembled from the
/// triplets, bounds and name indexes of the program on request.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Row position of the constraint
    pub index: usize,
    /// Unique name of the constraint
    pub name: String,
    /// Right hand side of the constraint
    pub bound: f64,
    /// Coefficients keyed by variable name, in the order they were added
    pub terms: IndexMap<String, f64>,
    /// `<=` for maximization problems, `>=` for minimization problems
    pub sense: ObjectiveSense,
}

impl Constraint {
    /// Convert the terms into a String representation
    fn terms_to_string(&self) -> String {
        if self.terms.is_empty() {
            return String::from("0");
        }
        self.terms
            .iter()
            .map(|(name, coefficient)| format!("{}*{}", coefficient, name))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let comparison = match self.sense {
            ObjectiveSense::Maximize => "<=",
            ObjectiveSense::Minimize => ">=",
        };
        write!(
            f,
            "{}: {} {} {}",
            self.name,
            self.terms_to_string(),
            comparison,
            self.bound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_triplet() {
        let triplet = Triplet::new(2, 5, -1.5);
        let transposed = triplet.transposed();
        assert_eq!(transposed, Triplet::new(5, 2, -1.5));
        assert_eq!(transposed.transposed(), triplet);
    }

    #[test]
    fn display_constraint() {
        let mut terms = IndexMap::new();
        terms.insert("x".to_string(), 1.);
        terms.insert("y".to_string(), 2.);
        let constraint = Constraint {
            index: 0,
            name: "capacity".to_string(),
            bound: 4.,
            terms,
            sense: ObjectiveSense::Maximize,
        };
        assert_eq!(constraint.to_string(), "capacity: 1*x + 2*y <= 4");
    }
}
