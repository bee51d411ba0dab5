//! Provides struct for representing a linear program's objective
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::optimize::problem::ProblemError;

/// Represents the Objective of a linear program
///
/// The objective is stored densely, one coefficient per column that was known when the
/// objective was last set.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    /// Coefficient for each column, indexed by column position
    coefficients: Vec<f64>,
    /// Sense of the objective (maximize, or minimize), see [`ObjectiveSense`]
    sense: ObjectiveSense,
}

impl Objective {
    /// Create a new empty objective, with a given sense
    pub fn new(sense: ObjectiveSense) -> Self {
        Self {
            coefficients: Vec::new(),
            sense,
        }
    }

    /// Create a new empty maximization objective
    pub fn new_maximize() -> Self {
        Self::new(ObjectiveSense::Maximize)
    }

    /// Create a new empty minimization objective
    pub fn new_minimize() -> Self {
        Self::new(ObjectiveSense::Minimize)
    }

    /// Create an objective from a dense coefficient vector
    pub(crate) fn from_coefficients(sense: ObjectiveSense, coefficients: Vec<f64>) -> Self {
        Self {
            coefficients,
            sense,
        }
    }

    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Replace all coefficients of the objective
    pub(crate) fn set_coefficients(&mut self, coefficients: Vec<f64>) {
        self.coefficients = coefficients;
    }

    /// Coefficients exactly as they were last set
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficients extended with zeros to cover `num_columns` columns
    ///
    /// Columns allocated after the objective was set have no stored coefficient and read
    /// as 0.0.
    pub fn dense(&self, num_columns: usize) -> Vec<f64> {
        let mut dense = self.coefficients.clone();
        if dense.len() < num_columns {
            dense.resize(num_columns, 0.0);
        }
        dense
    }
}

/// Represents the sense of the objective, whether it should be maximized or minimized
///
/// A maximization problem is read as `max c x s.t. A x <= b, x >= 0`, a minimization
/// problem as `min b y s.t. A y >= c, y >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveSense {
    /// The objective should be minimized
    #[serde(rename = "min")]
    Minimize,
    /// The objective should be maximized
    #[serde(rename = "max")]
    Maximize,
}

impl ObjectiveSense {
    /// The opposite sense, used when forming the dual
    pub fn flipped(self) -> Self {
        match self {
            ObjectiveSense::Minimize => ObjectiveSense::Maximize,
            ObjectiveSense::Maximize => ObjectiveSense::Minimize,
        }
    }

    /// Multiplier which turns this sense into a minimization
    pub fn sign(self) -> f64 {
        match self {
            ObjectiveSense::Minimize => 1.,
            ObjectiveSense::Maximize => -1.,
        }
    }
}

impl FromStr for ObjectiveSense {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max" => Ok(ObjectiveSense::Maximize),
            "min" => Ok(ObjectiveSense::Minimize),
            other => Err(ProblemError::UnknownObjectiveSense(other.to_string())),
        }
    }
}

impl Display for ObjectiveSense {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectiveSense::Minimize => write!(f, "min"),
            ObjectiveSense::Maximize => write!(f, "max"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sense() {
        assert_eq!("max".parse::<ObjectiveSense>().unwrap(), ObjectiveSense::Maximize);
        assert_eq!("min".parse::<ObjectiveSense>().unwrap(), ObjectiveSense::Minimize);
        match "maximise".parse::<ObjectiveSense>() {
            Err(ProblemError::UnknownObjectiveSense(sense)) => assert_eq!(sense, "maximise"),
            _ => panic!("Unknown objective sense not caught"),
        }
    }

    #[test]
    fn flip_and_sign() {
        assert_eq!(ObjectiveSense::Maximize.flipped(), ObjectiveSense::Minimize);
        assert_eq!(ObjectiveSense::Minimize.flipped(), ObjectiveSense::Maximize);
        assert!((ObjectiveSense::Maximize.sign() + 1.).abs() < 1e-25);
        assert!((ObjectiveSense::Minimize.sign() - 1.).abs() < 1e-25);
    }

    #[test]
    fn dense_pads_with_zeros() {
        let objective = Objective::from_coefficients(ObjectiveSense::Maximize, vec![2., 3.]);
        assert_eq!(objective.dense(4), vec![2., 3., 0., 0.]);
        assert_eq!(objective.dense(1), vec![2., 3.]);
        assert_eq!(Objective::new_minimize().dense(2), vec![0., 0.]);
        assert_eq!(Objective::new_maximize().sense(), ObjectiveSense::Maximize);
    }
}
