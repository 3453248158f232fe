/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, the expression and statement dispatchers and
/// scoped block execution.
pub mod core;

/// The scope chain.
///
/// Nested name to value mappings shared between blocks, calls and closures.
pub mod environment;

/// Non-local exits.
///
/// The outcome a statement hands back to its enclosing statement: fall
/// through, `return` or `break`.
pub mod signal;

/// Statement execution.
///
/// Declarations, `print`, conditionals and loops.
pub mod statement;

/// Binary operator evaluation logic.
///
/// Arithmetic, string concatenation, comparisons, equality and the
/// short-circuiting logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Arithmetic negation and logical NOT.
pub mod unary;

/// Utility functions for evaluation.
///
/// Variables, assignment, array literals and indexing.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and builtin function calls, arity checking and
/// return value computation.
pub mod function;
