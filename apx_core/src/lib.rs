//! Core rust implementation of apx, a crate for building, dualizing and solving linear programs.

pub mod configuration;
pub mod io;
pub mod optimize;

pub use io::expression::{parse_expression, IntoTerms};
pub use optimize::objective::ObjectiveSense;
pub use optimize::problem::{LinearProgram, ProblemError};
pub use optimize::LpSolution;
