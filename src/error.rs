/// Lexical errors.
///
/// Raised while scanning source text: unexpected characters and unterminated
/// string literals. Scanning continues after each one so that several can be
/// reported from a single pass.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the error produced when the token stream violates the grammar.
/// Each error carries the token it should be reported at and the span mode the
/// reporter should use to highlight it.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all faults that can be raised while evaluating a program: type
/// mismatches, undefined names, arity mismatches, invalid indices and
/// misplaced control flow.
pub mod runtime_error;
/// Builtin execution errors.
///
/// Builtins signal misuse with an `ExecutionError`, which the evaluator turns
/// into a positioned runtime error at the call site.
pub mod execution_error;
/// Diagnostic reporting.
///
/// The `Reporter` trait is the single channel through which faults reach the
/// user. Ships a console renderer and an in-memory collector.
pub mod reporter;

pub use execution_error::{ExecutionError, ExecutionResult};
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use reporter::{ConsoleReporter, Diagnostic, Diagnostics, Reporter, SpanMode};
pub use runtime_error::RuntimeError;
