//! Errors raised while compiling a format string or matching a filename.

use super::escape_byte;

/// Errors that can occur while compiling a format string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// Format string is empty.
    #[error("Format string cannot be empty")]
    Empty,

    /// A `$(` was opened but never closed.
    #[error("Unterminated variable starting at byte {position}: missing ')'")]
    UnterminatedVariable { position: usize },

    /// `$()` with nothing between the parentheses.
    #[error("Empty variable name at byte {position}")]
    EmptyName { position: usize },

    /// Two variables with no literal between them; the boundary would be ambiguous.
    #[error("variables must be separated by a literal, '$({first})' '$({second})' at element {position}")]
    AdjacentVariables {
        first: String,
        second: String,
        position: usize,
    },
}

/// Errors that can occur while matching input against a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// The byte at `position` differs from the literal the pattern expects.
    #[error("unexpected '{}' at byte {position}, expected '{}'", escape_byte(.found), escape_byte(.expected))]
    UnexpectedByte {
        expected: u8,
        found: u8,
        position: usize,
    },

    /// Input ended while the pattern still expected a literal.
    #[error("unexpected end of input at byte {position}, expected '{}'", escape_byte(.expected))]
    UnexpectedEnd { expected: u8, position: usize },

    /// A variable captured zero bytes.
    #[error("variable $({name}) not supplied at byte {position}")]
    EmptyVariable { name: String, position: usize },

    /// The pattern was exhausted before the input was.
    #[error("unconsumed input at byte {position}: '{rest}'")]
    TrailingInput { position: usize, rest: String },
}

impl MatchError {
    /// Byte offset into the input where matching failed.
    pub fn position(&self) -> usize {
        match self {
            MatchError::UnexpectedByte { position, .. }
            | MatchError::UnexpectedEnd { position, .. }
            | MatchError::EmptyVariable { position, .. }
            | MatchError::TrailingInput { position, .. } => *position,
        }
    }
}
