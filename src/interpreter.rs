/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions and executes
/// statements against a chain of scopes, and writes `print` output to its
/// sink. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every expression and statement form.
/// - Manages scopes, closures, calls and the `return` / `break` signals.
/// - Raises runtime errors such as type mismatches and undefined variables.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a list of tokens, each
/// corresponding to a meaningful language element such as a number, an
/// identifier, an operator or a keyword. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input into tokens with their lexeme, line and column.
/// - Handles numeric and string literals, identifiers, keywords and comments.
/// - Reports lexical errors for invalid or malformed input and keeps going.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into statement and expression nodes.
/// - Validates the grammar, reporting errors with a position and span mode.
/// - Recovers from errors at statement boundaries.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements truthiness, equality and rendering.
/// - Defines closures and builtins behind a common callable interface.
pub mod value;
