//! Module providing Token struct for lexing linear expressions

/// Represents Tokens in a linear expression
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /// A signed, named term such as `-2.5*x`
    Term { name: String, coefficient: f64 },
    Eof,
}
