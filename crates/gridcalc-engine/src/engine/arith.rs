//! Arithmetic evaluation for formulas whose references have been substituted.
//!
//! A recursive descent parser that evaluates as it parses:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := number | '(' expr ')'
//! ```
//!
//! A leading `+` or `-` is accepted only on the first factor of an `expr`, i.e.
//! at the very start or right after `(`. `5++10` and `2*-3` are syntax errors.
//! Parentheses nest at most [`MAX_NESTING_DEPTH`] deep.

use super::error::ErrorCode;

/// Deepest parenthesis nesting the parser will descend into.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Evaluate a purely arithmetic expression.
pub fn eval_arithmetic(expression: &str) -> Result<f64, ErrorCode> {
    let mut parser = ArithParser::new(expression);
    let value = parser.parse_expr()?;

    parser.skip_whitespace();
    if !parser.is_at_end() {
        return Err(ErrorCode::SyntaxError);
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ErrorCode::NumberOverflow)
    }
}

struct ArithParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> ArithParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Skip whitespace and consume `c` if it is next.
    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek_char() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn parse_expr(&mut self) -> Result<f64, ErrorCode> {
        let mut acc = self.parse_term(true)?;
        loop {
            if self.eat('+') {
                acc += self.parse_term(false)?;
            } else if self.eat('-') {
                acc -= self.parse_term(false)?;
            } else {
                return Ok(acc);
            }
        }
    }

    fn parse_term(&mut self, signed: bool) -> Result<f64, ErrorCode> {
        let mut acc = self.parse_factor(signed)?;
        loop {
            if self.eat('*') {
                acc *= self.parse_factor(false)?;
            } else if self.eat('/') {
                let divisor = self.parse_factor(false)?;
                if divisor == 0.0 {
                    return Err(ErrorCode::DivideByZero);
                }
                acc /= divisor;
            } else {
                return Ok(acc);
            }
        }
    }

    fn parse_factor(&mut self, signed: bool) -> Result<f64, ErrorCode> {
        if signed {
            if self.eat('-') {
                return Ok(-self.parse_factor(false)?);
            }
            if self.eat('+') {
                return self.parse_factor(false);
            }
        }

        if self.eat('(') {
            if self.depth >= MAX_NESTING_DEPTH {
                return Err(ErrorCode::DepthExceeded);
            }
            self.depth += 1;
            let value = self.parse_expr()?;
            self.depth -= 1;
            if !self.eat(')') {
                return Err(ErrorCode::SyntaxError);
            }
            return Ok(value);
        }

        self.parse_number()
    }

    fn parse_number(&mut self) -> Result<f64, ErrorCode> {
        self.skip_whitespace();
        let start = self.pos;
        let mut seen_digit = false;
        let mut seen_dot = false;

        while let Some(c) = self.peek_char() {
            match c {
                '0'..='9' => seen_digit = true,
                '.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.pos += 1;
        }

        if !seen_digit {
            return Err(ErrorCode::SyntaxError);
        }
        self.input[start..self.pos]
            .parse::<f64>()
            .map_err(|_| ErrorCode::SyntaxError)
    }
}
