//! Format string compiler.
//!
//! The grammar is fixed:
//!
//! ```text
//! Format   -> Expr+
//! Expr     -> Variable | Literal
//! Variable -> '$' '(' Name ')'
//! Name     -> any run of bytes not containing ')'
//! Literal  -> any single byte
//! ```
//!
//! Each production is a method on [`Parser`]. A production that does not
//! match restores the cursor to where it started, so `Expr` can fall back
//! from `Variable` to `Literal` without partial consumption.

use super::{Element, PatternError};

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

/// Compiles a format string into its elements. Validation is the caller's job.
pub(super) fn parse(input: &[u8]) -> Result<Vec<Element>, PatternError> {
    if input.is_empty() {
        return Err(PatternError::Empty);
    }

    let mut parser = Parser { input, pos: 0 };
    let mut elements = Vec::with_capacity(input.len());
    while let Some(element) = parser.expr()? {
        elements.push(element);
    }
    Ok(elements)
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Consumes `token` if it is next; leaves the cursor alone otherwise.
    fn eat(&mut self, token: u8) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// `Expr -> Variable | Literal`. Returns `None` at end of input.
    fn expr(&mut self) -> Result<Option<Element>, PatternError> {
        if let Some(variable) = self.variable()? {
            return Ok(Some(variable));
        }
        Ok(self.literal())
    }

    /// `Variable -> '$' '(' Name ')'`.
    ///
    /// Returns `Ok(None)` with the cursor restored when the input doesn't
    /// start with `$(`. Once `$(` has been seen the variable must be closed
    /// and named.
    fn variable(&mut self) -> Result<Option<Element>, PatternError> {
        let start = self.pos;
        if !(self.eat(b'$') && self.eat(b'(')) {
            self.pos = start;
            return Ok(None);
        }

        let name = self.name();
        if !self.eat(b')') {
            self.pos = start;
            return Err(PatternError::UnterminatedVariable { position: start });
        }
        if name.is_empty() {
            self.pos = start;
            return Err(PatternError::EmptyName { position: start });
        }

        Ok(Some(Element::Variable(
            String::from_utf8_lossy(name).into_owned(),
        )))
    }

    /// `Name -> bytes up to (not including) the next ')'`.
    fn name(&mut self) -> &'a [u8] {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b')' {
                break;
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// `Literal -> any byte`.
    fn literal(&mut self) -> Option<Element> {
        let b = self.peek()?;
        self.pos += 1;
        Some(Element::Literal(b))
    }
}
