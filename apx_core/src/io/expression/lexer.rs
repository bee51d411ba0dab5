//! Lex a linear expression string into a series of term tokens
//!
//! Each term is `[+|-][magnitude][*]name`. Anything that does not fit that shape is
//! skipped one character at a time, so `"x + 3"` lexes to the single term `x`.

use std::collections::VecDeque;

use log::debug;

use crate::io::expression::token::Token;

pub struct Lexer {
    source: Vec<char>,
    tokens: VecDeque<Token>,
    start: usize,
    current: usize,
}

impl Lexer {
    /// Create a lexer over `source`, whitespace is dropped up front
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().filter(|c| !c.is_whitespace()).collect(),
            tokens: VecDeque::new(),
            start: 0,
            current: 0,
        }
    }

    pub fn scan_tokens(&mut self) -> &VecDeque<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            match self.scan_term() {
                Some(token) => self.add_token(token),
                None => {
                    debug!(
                        "Skipping malformed input at offset {}: {:?}",
                        self.start, self.source[self.start]
                    );
                    self.current = self.start + 1;
                }
            }
        }

        self.tokens.push_back(Token::Eof);
        &self.tokens
    }

    /// Try to read a single term starting at `self.start`
    fn scan_term(&mut self) -> Option<Token> {
        let sign = match self.peek() {
            '-' => {
                self.advance();
                -1.0
            }
            '+' => {
                self.advance();
                1.0
            }
            _ => 1.0,
        };
        let magnitude = self.read_magnitude()?;
        if self.peek() == '*' {
            self.advance();
        }
        let name = self.read_identifier()?;
        Some(Token::Term {
            name,
            coefficient: sign * magnitude,
        })
    }

    /// Read an optional `12`, `1.5` or `.5` style number, defaulting to 1.0 when absent
    fn read_magnitude(&mut self) -> Option<f64> {
        let number_start = self.current;
        while Lexer::is_digit(self.peek()) {
            self.advance();
        }
        if self.peek() == '.' && Lexer::is_digit(self.peek_next()) {
            self.advance();
            while Lexer::is_digit(self.peek()) {
                self.advance();
            }
        }
        if self.current == number_start {
            return Some(1.0);
        }
        let text: String = self.source[number_start..self.current].iter().collect();
        text.parse::<f64>().ok()
    }

    fn read_identifier(&mut self) -> Option<String> {
        let name_start = self.current;
        while Lexer::is_alphanumeric(self.peek()) {
            self.advance();
        }
        if self.current == name_start {
            return None;
        }
        Some(self.source[name_start..self.current].iter().collect())
    }

    fn advance(&mut self) -> char {
        let char_at_current = self.source[self.current];
        self.current += 1;
        char_at_current
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn is_alphanumeric(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }
        self.source[self.current]
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            return '\0';
        }
        self.source[self.current + 1]
    }

    fn add_token(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::io::expression::lexer::Lexer;
    use crate::io::expression::token::Token;

    fn term(name: &str, coefficient: f64) -> Token {
        Token::Term {
            name: name.to_string(),
            coefficient,
        }
    }

    #[test]
    fn test_single_term() {
        let mut lexer = Lexer::new("x");
        let tokens = lexer.scan_tokens();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.get(0).unwrap(), &term("x", 1.0));
        assert_eq!(tokens.get(1).unwrap(), &Token::Eof);
    }

    #[test]
    fn test_signs_and_coefficients() {
        let mut lexer = Lexer::new("3*x - 2y + .5 z_1 -w");
        let tokens: Vec<Token> = lexer.scan_tokens().iter().cloned().collect();
        assert_eq!(
            tokens,
            vec![
                term("x", 3.0),
                term("y", -2.0),
                term("z_1", 0.5),
                term("w", -1.0),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_whitespace_inside_numbers_is_dropped() {
        let mut lexer = Lexer::new("1 2 x");
        let tokens = lexer.scan_tokens();
        assert_eq!(tokens.get(0).unwrap(), &term("x", 12.0));
    }

    #[test]
    fn test_malformed_input_is_skipped() {
        let mut lexer = Lexer::new("x + 3 ) ( - 2.y");
        let tokens: Vec<Token> = lexer.scan_tokens().iter().cloned().collect();
        // "2." is not a number, so "2" is skipped and "." is skipped, leaving "y"
        assert_eq!(tokens, vec![term("x", 1.0), term("y", 1.0), Token::Eof]);
    }

    #[test]
    fn test_empty_input() {
        let mut lexer = Lexer::new("   ");
        let tokens = lexer.scan_tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get(0).unwrap(), &Token::Eof);
    }
}
