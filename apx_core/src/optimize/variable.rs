//! Module providing representation of linear program variables
use std::fmt::{Display, Formatter};

/// A named, non-negative, continuous variable of a linear program
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Variable {
    /// Name of the variable, unique within a program
    pub name: String,
    /// Column position of the variable
    pub index: usize,
}

impl Variable {
    /// Create a new variable
    pub(crate) fn new(name: &str, index: usize) -> Variable {
        Variable {
            name: name.to_string(),
            index,
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.index)
    }
}
