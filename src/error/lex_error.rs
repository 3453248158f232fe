use thiserror::Error;

/// A fault found while scanning source text.
///
/// Lexical errors are positioned by raw line and column rather than by token,
/// since no token could be produced for the offending text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LexError {
    /// Human readable description of the fault.
    pub message: String,
    /// 1-based line of the offending text.
    pub line:    usize,
    /// 1-based column of the offending text.
    pub column:  usize,
}

impl LexError {
    /// An unrecognized character.
    #[must_use]
    pub fn unexpected_character(character: char, line: usize, column: usize) -> Self {
        Self { message: format!("Unexpected character '{character}'."),
               line,
               column }
    }

    /// A string literal whose closing quote was never found.
    #[must_use]
    pub fn unterminated_string(line: usize, column: usize) -> Self {
        Self { message: "Unterminated string.".to_string(),
               line,
               column }
    }
}
