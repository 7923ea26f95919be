//! Unit expression parser: a small recursive descent parser over
//! `km/h`, `m/s^2`, `N*m`, `kg m**2 / (s**2)` and friends.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('*' | '/' | <juxtaposition>) term)*
//! term   := atom (('^' | '**') '-'? INT)?
//! atom   := NAME | '1' | '(' expr ')'
//! ```
//!
//! Names are resolved through a caller-supplied lookup so the parser knows
//! nothing about which units exist.

use crate::error::{UnitError, UnitResult};
use crate::unit::Unit;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Int(i64),
    Star,
    Slash,
    Pow,
    Minus,
    OpenParen,
    CloseParen,
    Eof,
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '*' | '/' | '^' | '(' | ')' | '·' | '-')
}

fn tokenize(expr: &str) -> UnitResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '*' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '*'))) {
                    chars.next();
                    tokens.push(Token::Pow);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '·' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Pow);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '(' => {
                chars.next();
                tokens.push(Token::OpenParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::CloseParen);
            }
            c if c.is_ascii_digit() => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let text = &expr[start..end];
                let value = text.parse::<i64>().map_err(|_| UnitError::Syntax {
                    expr: expr.to_string(),
                    message: format!("number '{}' is out of range", text),
                })?;
                tokens.push(Token::Int(value));
            }
            _ => {
                // Names may contain digits after the first character (`iso8601`).
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if !is_name_char(d) {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Name(expr[start..end].to_string()));
            }
        }
    }

    tokens.push(Token::Eof);
    Ok(tokens)
}

/// Parse `expr`, resolving every name through `lookup`.
///
/// An empty or all-whitespace expression is dimensionless.
pub fn parse_expression(expr: &str, lookup: &dyn Fn(&str) -> UnitResult<Unit>) -> UnitResult<Unit> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser {
        expr,
        tokens,
        pos: 0,
        lookup,
    };

    if parser.check(&Token::Eof) {
        return Ok(Unit::dimensionless());
    }

    let unit = parser.parse_expr()?;
    if !parser.check(&Token::Eof) {
        return Err(parser.error(format!("unexpected {:?}", parser.peek())));
    }
    Ok(unit)
}

struct Parser<'a> {
    expr: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    lookup: &'a dyn Fn(&str) -> UnitResult<Unit>,
}

impl Parser<'_> {
    fn parse_expr(&mut self) -> UnitResult<Unit> {
        let mut unit = self.parse_term()?;
        loop {
            match self.peek() {
                Token::Star => {
                    self.advance();
                    let rhs = self.parse_term()?;
                    unit = unit.multiply(&rhs).ok_or_else(|| self.overflow())?;
                }
                Token::Slash => {
                    self.advance();
                    let rhs = self.parse_term()?;
                    unit = unit.divide(&rhs).ok_or_else(|| self.overflow())?;
                }
                Token::Name(_) | Token::Int(_) | Token::OpenParen => {
                    let rhs = self.parse_term()?;
                    unit = unit.multiply(&rhs).ok_or_else(|| self.overflow())?;
                }
                _ => return Ok(unit),
            }
        }
    }

    fn parse_term(&mut self) -> UnitResult<Unit> {
        let base = self.parse_atom()?;
        if !self.check(&Token::Pow) {
            return Ok(base);
        }
        self.advance();

        let negative = if self.check(&Token::Minus) {
            self.advance();
            true
        } else {
            false
        };
        let exponent = match self.advance() {
            Token::Int(n) => n,
            other => return Err(self.error(format!("expected integer exponent, found {:?}", other))),
        };
        let exponent = if negative { -exponent } else { exponent };
        let exponent = i8::try_from(exponent)
            .map_err(|_| self.error(format!("exponent {} is out of range", exponent)))?;

        base.pow(exponent).ok_or_else(|| self.overflow())
    }

    fn parse_atom(&mut self) -> UnitResult<Unit> {
        match self.advance() {
            Token::Name(name) => (self.lookup)(&name),
            Token::Int(1) => Ok(Unit::dimensionless()),
            Token::Int(n) => Err(self.error(format!("scaling factor {} is not allowed", n))),
            Token::OpenParen => {
                let unit = self.parse_expr()?;
                match self.advance() {
                    Token::CloseParen => Ok(unit),
                    other => Err(self.error(format!("expected ')', found {:?}", other))),
                }
            }
            Token::Eof => Err(self.error("unexpected end of expression".to_string())),
            other => Err(self.error(format!("unexpected {:?}", other))),
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, token: &Token) -> bool {
        self.peek() == token
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn overflow(&self) -> UnitError {
        self.error("dimension exponent is out of range".to_string())
    }

    fn error(&self, message: String) -> UnitError {
        UnitError::Syntax {
            expr: self.expr.to_string(),
            message,
        }
    }
}
