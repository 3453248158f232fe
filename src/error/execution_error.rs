use thiserror::Error;

/// Result type returned by builtins.
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Represents the ways a builtin can be misused.
///
/// Builtins have no access to source positions, so these errors are converted
/// into [`RuntimeError::Execution`](crate::error::RuntimeError::Execution) at
/// the closing parenthesis of the offending call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    /// The argument had to be a string or an array.
    #[error("Expected string or array, found {found}.")]
    ExpectedCollection {
        /// Type name of the value that was supplied.
        found: &'static str,
    },
    /// The index argument was not a number.
    #[error("Index must be a number, found {found}.")]
    ExpectedNumber {
        /// Type name of the value that was supplied.
        found: &'static str,
    },
    /// The index argument was a number with a fractional part.
    #[error("Index must be an integer, found {index}.")]
    FractionalIndex {
        /// The index that was supplied.
        index: f64,
    },
    /// The collection is too long for its length to be a number.
    #[error("Length {len} is too large to represent.")]
    LengthTooLarge {
        /// The collection's length.
        len: usize,
    },
    /// The index argument fell outside the collection.
    #[error("Index {index} is out of bounds for length {len}.")]
    IndexOutOfBounds {
        /// The index that was supplied.
        index: f64,
        /// Length of the collection.
        len:   usize,
    },
}
