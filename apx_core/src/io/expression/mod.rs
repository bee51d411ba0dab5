//! Module for parsing textual linear expressions into named coefficients

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::io::expression::token::Token;

mod lexer;
mod token;

/// Parse a linear expression such as `"3*x - 2*y + z"` into a map of name to coefficient
///
/// Whitespace is ignored, terms without a coefficient get a magnitude of 1, and the `*`
/// between coefficient and name is optional. Substrings that are not valid terms are
/// skipped rather than reported.
///
/// # Parameters
/// - `input`: &str holding the expression
///
/// # Returns
/// An IndexMap of the names in order of first appearance. When a name appears more than
/// once the last coefficient wins.
///
/// # Examples
/// ```rust
/// use apx_core::io::expression::parse_expression;
/// let terms = parse_expression("3*x - 2y + z");
/// assert_eq!(terms.get("x"), Some(&3.0));
/// assert_eq!(terms.get("y"), Some(&-2.0));
/// assert_eq!(terms.get("z"), Some(&1.0));
/// ```
pub fn parse_expression(input: &str) -> IndexMap<String, f64> {
    let mut lexer = lexer::Lexer::new(input);
    let mut terms = IndexMap::new();
    for token in lexer.scan_tokens() {
        match token {
            Token::Term { name, coefficient } => {
                terms.insert(name.clone(), *coefficient);
            }
            Token::Eof => break,
        }
    }
    terms
}

/// Conversion into an ordered map of name to coefficient
///
/// Implemented for expression strings (parsed with [`parse_expression`]) and for already
/// parsed collections of `(name, coefficient)` pairs.
pub trait IntoTerms {
    fn into_terms(self) -> IndexMap<String, f64>;
}

impl IntoTerms for &str {
    fn into_terms(self) -> IndexMap<String, f64> {
        parse_expression(self)
    }
}

impl IntoTerms for String {
    fn into_terms(self) -> IndexMap<String, f64> {
        parse_expression(&self)
    }
}

impl IntoTerms for &String {
    fn into_terms(self) -> IndexMap<String, f64> {
        parse_expression(self)
    }
}

impl IntoTerms for IndexMap<String, f64> {
    fn into_terms(self) -> IndexMap<String, f64> {
        self
    }
}

impl IntoTerms for &IndexMap<String, f64> {
    fn into_terms(self) -> IndexMap<String, f64> {
        self.clone()
    }
}

impl IntoTerms for HashMap<String, f64> {
    fn into_terms(self) -> IndexMap<String, f64> {
        self.into_iter().collect()
    }
}

impl IntoTerms for Vec<(String, f64)> {
    fn into_terms(self) -> IndexMap<String, f64> {
        self.into_iter().collect()
    }
}

impl IntoTerms for &[(&str, f64)] {
    fn into_terms(self) -> IndexMap<String, f64> {
        self.iter()
            .map(|(name, coefficient)| (name.to_string(), *coefficient))
            .collect()
    }
}

impl<const N: usize> IntoTerms for [(&str, f64); N] {
    fn into_terms(self) -> IndexMap<String, f64> {
        self.into_iter()
            .map(|(name, coefficient)| (name.to_string(), coefficient))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_coefficient_and_sign() {
        let terms = parse_expression("x+y");
        assert_eq!(terms.len(), 2);
        assert!((terms["x"] - 1.0).abs() < 1e-25);
        assert!((terms["y"] - 1.0).abs() < 1e-25);
    }

    #[test]
    fn decimal_coefficients() {
        let terms = parse_expression("1.25*alpha - 0.5 beta + .75gamma");
        assert!((terms["alpha"] - 1.25).abs() < 1e-25);
        assert!((terms["beta"] + 0.5).abs() < 1e-25);
        assert!((terms["gamma"] - 0.75).abs() < 1e-25);
    }

    #[test]
    fn repeated_name_overrides() {
        // The later coefficient replaces the earlier one, it is not summed
        let terms = parse_expression("2x + y - 5x");
        assert_eq!(terms.len(), 2);
        assert!((terms["x"] + 5.0).abs() < 1e-25);
        // x keeps the position of its first occurrence
        assert_eq!(terms.get_index_of("x"), Some(0));
        assert_eq!(terms.get_index_of("y"), Some(1));
    }

    #[test]
    fn malformed_terms_are_ignored() {
        let terms = parse_expression("x + 3 - (y)");
        assert_eq!(terms.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!((terms["y"] - 1.0).abs() < 1e-25);
    }

    #[test]
    fn empty_expression() {
        assert!(parse_expression("").is_empty());
    }

    #[test]
    fn into_terms_conversions() {
        let from_str = "x - y".into_terms();
        let from_pairs = [("x", 1.0), ("y", -1.0)].into_terms();
        let from_vec = vec![("x".to_string(), 1.0), ("y".to_string(), -1.0)].into_terms();
        assert_eq!(from_str, from_pairs);
        assert_eq!(from_str, from_vec);

        let mut hash_map = HashMap::new();
        hash_map.insert("x".to_string(), 1.0);
        let from_hash_map = hash_map.into_terms();
        assert_eq!(from_hash_map.get("x"), Some(&1.0));
    }
}
