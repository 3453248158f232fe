use thiserror::Error;

use crate::{error::reporter::SpanMode, interpreter::lexer::Token};

#[derive(Debug, Clone, PartialEq, Error)]
/// Represents all errors that can occur during evaluation.
///
/// Every variant carries the token the error is reported at. A runtime error
/// aborts the rest of the program; there is no per-statement recovery.
pub enum RuntimeError {
    /// Read or assigned a name that is not bound in any enclosing scope.
    #[error("Undefined variable '{}'.", .name.lexeme)]
    UndefinedVariable {
        /// The identifier that failed to resolve.
        name: Token,
    },
    /// An operator was applied to operands of the wrong type.
    #[error("{details}")]
    TypeMismatch {
        /// Details about the type mismatch.
        details:  String,
        /// The operator token.
        operator: Token,
    },
    /// Called a value that is not a function.
    #[error("Can only call functions, found {found}.")]
    NotCallable {
        /// Type name of the callee.
        found: &'static str,
        /// The closing parenthesis of the call.
        paren: Token,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Expected {expected} arguments but got {found}.")]
    ArgumentCountMismatch {
        /// The callee's declared arity.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The closing parenthesis of the call.
        paren:    Token,
    },
    /// Indexed a value that is neither an array nor a string.
    #[error("Only arrays and strings can be indexed, found {found}.")]
    NotIndexable {
        /// Type name of the indexed value.
        found:   &'static str,
        /// The opening bracket of the index expression.
        bracket: Token,
    },
    /// The index expression did not evaluate to a number.
    #[error("Index must be a number, found {found}.")]
    NonNumericIndex {
        /// Type name of the index value.
        found:   &'static str,
        /// The opening bracket of the index expression.
        bracket: Token,
    },
    /// The index had a fractional part.
    #[error("Index must be an integer, found {index}.")]
    FractionalIndex {
        /// The index that was supplied.
        index:   f64,
        /// The opening bracket of the index expression.
        bracket: Token,
    },
    /// The index fell outside the collection.
    #[error("Index {index} is out of bounds for length {len}.")]
    IndexOutOfBounds {
        /// The index that was supplied.
        index:   f64,
        /// Length of the indexed collection.
        len:     usize,
        /// The opening bracket of the index expression.
        bracket: Token,
    },
    /// A builtin rejected its arguments.
    #[error("{message}")]
    Execution {
        /// The builtin's own description of the fault.
        message: String,
        /// The closing parenthesis of the call.
        paren:   Token,
    },
    /// A `return` statement ran outside of any function call.
    #[error("Can't return from top-level code.")]
    ReturnOutsideFunction {
        /// The `return` keyword.
        keyword: Token,
    },
    /// A `break` statement ran outside of any loop.
    #[error("Can't break outside of a loop.")]
    BreakOutsideLoop {
        /// The `break` keyword.
        keyword: Token,
    },
    /// Function calls nested deeper than the interpreter allows.
    #[error("Stack overflow: call depth exceeded {limit}.")]
    StackOverflow {
        /// The configured maximum call depth.
        limit: usize,
        /// The closing parenthesis of the call that overflowed.
        paren: Token,
    },
    /// Writing to the output sink failed.
    #[error("Failed to write output: {details}.")]
    Output {
        /// The underlying I/O error message.
        details: String,
        /// The `print` keyword.
        keyword: Token,
    },
}

impl RuntimeError {
    /// The token this error should be reported at.
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::UndefinedVariable { name } => name,
            Self::TypeMismatch { operator, .. } => operator,
            Self::NotCallable { paren, .. }
            | Self::ArgumentCountMismatch { paren, .. }
            | Self::Execution { paren, .. }
            | Self::StackOverflow { paren, .. } => paren,
            Self::NotIndexable { bracket, .. }
            | Self::NonNumericIndex { bracket, .. }
            | Self::FractionalIndex { bracket, .. }
            | Self::IndexOutOfBounds { bracket, .. } => bracket,
            Self::ReturnOutsideFunction { keyword }
            | Self::BreakOutsideLoop { keyword }
            | Self::Output { keyword, .. } => keyword,
        }
    }

    /// How the reporter should highlight [`Self::token`].
    #[must_use]
    pub const fn mode(&self) -> SpanMode {
        match self {
            Self::Output { .. } => SpanMode::FullLine,
            _ => SpanMode::Cover,
        }
    }
}
