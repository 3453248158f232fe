/// The parser state and the declaration loop.
///
/// Holds the token cursor, drives statement-level error recovery and exposes
/// the `parse` entry point.
pub mod core;

/// Token cursor helpers.
///
/// Peeking, consuming and matching tokens, plus shared list parsing.
pub mod utils;

/// Statement parsing.
///
/// Declarations and statements, including the `for` loop desugaring.
pub mod statement;

/// Block parsing.
///
/// Brace-delimited statement lists, with recovery at every inner declaration.
pub mod block;

/// Binary operator parsing.
///
/// Assignment, the logical operators and the left-associative arithmetic,
/// comparison and equality levels.
pub mod binary;

/// Unary and postfix parsing.
///
/// Prefix operators, calls, indexing and primary expressions.
pub mod unary;
