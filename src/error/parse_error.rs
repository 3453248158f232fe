use thiserror::Error;

use crate::{error::reporter::SpanMode, interpreter::lexer::Token};

/// A grammar violation found by the parser.
///
/// The parser never aborts on the first error: it reports the error,
/// resynchronizes at the next statement boundary and keeps going.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// The token the error is reported at.
    pub token:   Token,
    /// Human readable description of the fault.
    pub message: String,
    /// How the reporter should highlight `token`.
    pub mode:    SpanMode,
}

impl ParseError {
    #[must_use]
    pub fn new(token: Token, message: impl Into<String>, mode: SpanMode) -> Self {
        Self { token,
               message: message.into(),
               mode }
    }
}
