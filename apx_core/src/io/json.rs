//! Module providing JSON IO for linear programs
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::{LinearProgram, ProblemError};

// region JSON Model
/// Represents a JSON serialized linear program
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct JsonLinearProgram {
    sense: ObjectiveSense,
    /// Variable names in column order, so that column positions survive a round trip
    variables: Vec<String>,
    constraints: Vec<JsonConstraint>,
    #[serde(default)]
    objective: IndexMap<String, f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct JsonConstraint {
    name: String,
    bound: f64,
    terms: IndexMap<String, f64>,
}
// endregion JSON Model

// region Conversions
impl From<&LinearProgram> for JsonLinearProgram {
    fn from(lp: &LinearProgram) -> Self {
        let constraints = lp
            .constraints()
            .into_iter()
            .map(|c| JsonConstraint {
                name: c.name,
                bound: c.bound,
                terms: c.terms,
            })
            .collect();
        let objective = lp
            .columns()
            .names()
            .zip(lp.objective())
            .filter(|(_, coefficient)| *coefficient != 0.)
            .map(|(name, coefficient)| (name.to_string(), coefficient))
            .collect();
        JsonLinearProgram {
            sense: lp.sense(),
            variables: lp.columns().names().map(String::from).collect(),
            constraints,
            objective,
        }
    }
}

impl LinearProgram {
    /// Rebuild a problem through the regular building operations, so that every
    /// invariant (such as unique constraint names) is checked again
    fn from_json(json_lp: JsonLinearProgram) -> Result<Self, ProblemError> {
        let mut lp = LinearProgram::new(json_lp.sense);
        for variable in &json_lp.variables {
            lp.resolve_column(variable);
        }
        for constraint in json_lp.constraints {
            lp.add_constraint(constraint.terms, constraint.bound, Some(constraint.name.as_str()))?;
        }
        lp.set_objective(json_lp.objective);
        Ok(lp)
    }

    /// Serialize the problem into a JSON string
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string_pretty(&JsonLinearProgram::from(self))?)
    }

    /// Build a problem from a JSON string
    ///
    /// # Examples
    /// ```rust
    /// use apx_core::optimize::problem::LinearProgram;
    /// let lp = LinearProgram::from_json_str(r#"{
    ///     "sense": "max",
    ///     "variables": ["x", "y"],
    ///     "constraints": [{"name": "c1", "bound": 4.0, "terms": {"x": 1.0, "y": 2.0}}],
    ///     "objective": {"x": 2.0, "y": 3.0}
    /// }"#).unwrap();
    /// assert_eq!(lp.num_rows(), 1);
    /// assert_eq!(lp.objective(), vec![2., 3.]);
    /// ```
    pub fn from_json_str(json: &str) -> Result<LinearProgram, JsonError> {
        let json_lp = match serde_json::from_str::<JsonLinearProgram>(json) {
            Ok(json_lp) => json_lp,
            Err(err) => return Err(JsonError::UnableToParse(format!("{}", err))),
        };
        Ok(LinearProgram::from_json(json_lp)?)
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<LinearProgram, JsonError> {
        let lp_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{}", err))),
        };
        LinearProgram::from_json_str(&lp_str)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let lp_string = self.to_json_string()?;
        fs::write(path, lp_string)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("The json describes an invalid linear program")]
    InvalidProblem(#[from] ProblemError),
    #[error("Serde json error")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}
// endregion Conversions

#[cfg(test)]
mod json_tests {
    use super::*;
    use std::path::PathBuf;

    fn example_problem() -> LinearProgram {
        let mut lp = LinearProgram::new_maximization();
        lp.add_constraint("x + 2y", 4., None).unwrap();
        lp.add_constraint("3x + y - z", 6., Some("second")).unwrap();
        lp.set_objective("2x + 3y");
        lp
    }

    #[test]
    fn json_conversion() {
        let json_lp = JsonLinearProgram::from(&example_problem());
        assert_eq!(json_lp.sense, ObjectiveSense::Maximize);
        assert_eq!(json_lp.variables, vec!["x", "y", "z"]);
        assert_eq!(json_lp.constraints.len(), 2);
        assert_eq!(json_lp.constraints[0].name, "y1");
        assert_eq!(json_lp.constraints[1].terms.get("z"), Some(&-1.));
        // Zero coefficients are left out
        assert_eq!(json_lp.objective.len(), 2);
    }

    #[test]
    fn round_trip() {
        let lp = example_problem();
        let restored = LinearProgram::from_json_str(&lp.to_json_string().unwrap()).unwrap();
        assert_eq!(restored.sense(), lp.sense());
        assert_eq!(restored.triplets(), lp.triplets());
        assert_eq!(restored.bounds(), lp.bounds());
        assert_eq!(restored.objective(), lp.objective());
        assert_eq!(
            restored.columns().names().collect::<Vec<_>>(),
            lp.columns().names().collect::<Vec<_>>()
        );
        assert_eq!(
            restored.rows().names().collect::<Vec<_>>(),
            lp.rows().names().collect::<Vec<_>>()
        );
    }

    #[test]
    fn duplicate_names_rejected() {
        let data = r#"{
"sense":"min",
"variables":["x"],
"constraints":[
    {"name":"c","bound":1.0,"terms":{"x":1.0}},
    {"name":"c","bound":2.0,"terms":{"x":2.0}}
]
}"#;
        match LinearProgram::from_json_str(data) {
            Err(JsonError::InvalidProblem(ProblemError::DuplicateConstraintName(name))) => {
                assert_eq!(name, "c")
            }
            _ => panic!("Duplicate constraint name not caught"),
        }
    }

    #[test]
    fn bad_sense_rejected() {
        let data = r#"{"sense":"sideways","variables":[],"constraints":[]}"#;
        assert!(matches!(
            LinearProgram::from_json_str(data),
            Err(JsonError::UnableToParse(_))
        ));
    }

    #[test]
    fn read_json() {
        let data_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("diet.json");
        let lp = LinearProgram::read_json(data_path).unwrap();
        assert_eq!(lp.sense(), ObjectiveSense::Minimize);
        assert_eq!(lp.num_columns(), 2);
        assert_eq!(lp.num_rows(), 2);
        assert_eq!(lp.row_name(1), Some("calories"));
        let solution = lp.solve().unwrap();
        // min 3 bread + 2 milk s.t. bread + 3 milk >= 6, bread + milk >= 4
        assert!((solution.objective_value - 8.0).abs() < 1e-5);
        assert!((solution.value("milk").unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn write_json() {
        let path = std::env::temp_dir().join("apx_core_write_json_test.json");
        let lp = example_problem();
        lp.write_json(&path).unwrap();
        let restored = LinearProgram::read_json(&path).unwrap();
        assert_eq!(restored.triplets(), lp.triplets());
        fs::remove_file(path).unwrap();
    }
}
