//! # probe
//!
//! probe is a small, dynamically typed scripting language with a tree-walking
//! interpreter written in Rust. It has numbers, strings, booleans, `nil`,
//! arrays, first-class functions with lexical closures, and the `len` and
//! `set` builtins.
//!
//! Source text goes through three phases: the [lexer](interpreter::lexer)
//! turns it into tokens, the [parser](interpreter::parser) builds an
//! [AST](ast), and the [evaluator](interpreter::evaluator) runs it. Every
//! fault is handed to an [`error::Reporter`] instead of being printed
//! directly.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use log::debug;

use crate::{
    ast::Stmt,
    error::Reporter,
    interpreter::{
        evaluator::core::Interpreter,
        lexer::{Lexer, Token},
        parser::core::Parser,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums that represent the
/// syntactic structure of a program as a tree. The AST is built by the parser
/// and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Keeps the tokens needed to position runtime faults on the nodes that can
///   raise them.
/// - Renders trees as S-expressions for debugging.
pub mod ast;
/// Provides the error types and the reporting channel.
///
/// Lexical, syntax, runtime and builtin faults each have their own type. None
/// of them are printed by the phase that raises them; they go through the
/// `Reporter` trait.
///
/// # Responsibilities
/// - Defines error types for all failure modes (lexer, parser, evaluator,
///   builtins).
/// - Carries the position and span mode each fault should be highlighted
///   with.
/// - Renders diagnostics against the source, or collects them in memory.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and the runtime value
/// representation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Convert between `usize` and `f64` without silent data loss.
/// - Turn runtime numbers into collection indices.
pub mod util;

/// How far a program got through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every statement ran.
    Completed,
    /// Scanning reported at least one fault; nothing was parsed.
    LexicalErrors,
    /// Parsing reported at least one fault; nothing was run.
    SyntaxErrors,
    /// A runtime fault stopped the program.
    RuntimeError,
}

impl RunStatus {
    /// The process exit code conventionally used for this outcome.
    ///
    /// `0` on success, `65` for malformed input and `70` for a runtime fault.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Completed => 0,
            Self::LexicalErrors | Self::SyntaxErrors => 65,
            Self::RuntimeError => 70,
        }
    }
}

/// Scans `source` into tokens.
///
/// # Errors
/// [`RunStatus::LexicalErrors`] if any lexical fault was reported.
pub fn tokenize(source: &str, reporter: &mut dyn Reporter) -> Result<Vec<Token>, RunStatus> {
    let mut lexer = Lexer::new(reporter);
    let tokens = lexer.scan(source);
    if lexer.had_error() {
        return Err(RunStatus::LexicalErrors);
    }
    Ok(tokens)
}

/// Scans and parses `source` into a program.
///
/// Parsing is skipped entirely if scanning reported a fault.
///
/// # Errors
/// [`RunStatus::LexicalErrors`] or [`RunStatus::SyntaxErrors`] if either
/// phase reported a fault.
///
/// # Example
/// ```
/// use probe::{RunStatus, error::Diagnostics, parse_program};
///
/// let mut diagnostics = Diagnostics::new();
/// assert_eq!(parse_program("print (1;", &mut diagnostics),
///            Err(RunStatus::SyntaxErrors));
/// assert_eq!(diagnostics.messages(), vec!["Expect ')' after expression."]);
/// ```
pub fn parse_program(source: &str, reporter: &mut dyn Reporter) -> Result<Vec<Stmt>, RunStatus> {
    let tokens = tokenize(source, reporter)?;
    let mut parser = Parser::new(&tokens, reporter);
    let program = parser.parse();
    if parser.had_error() {
        return Err(RunStatus::SyntaxErrors);
    }
    Ok(program)
}

/// Runs a program from source, printing to `out`.
///
/// Scans, parses and interprets `source` with a fresh interpreter. Faults of
/// every phase go to `reporter`; a later phase never runs after an earlier
/// one reported a fault.
///
/// # Example
/// ```
/// use probe::{RunStatus, error::Diagnostics, run};
///
/// let mut out = Vec::new();
/// let mut diagnostics = Diagnostics::new();
/// let source = "var a = [1, 2]; print len(a); print set(a, 0, 5); print a;";
///
/// assert_eq!(run(source, &mut out, &mut diagnostics), RunStatus::Completed);
/// assert_eq!(String::from_utf8(out).unwrap(), "2\n[5, 2]\n[1, 2]\n");
/// ```
pub fn run(source: &str, out: &mut dyn Write, reporter: &mut dyn Reporter) -> RunStatus {
    let mut interpreter = Interpreter::new(out);
    run_with(&mut interpreter, source, reporter)
}

/// Like [`run`], against a caller-configured interpreter.
///
/// Globals defined by earlier runs on the same interpreter stay visible.
pub fn run_with(interpreter: &mut Interpreter<'_>,
                source: &str,
                reporter: &mut dyn Reporter)
                -> RunStatus {
    let program = match parse_program(source, reporter) {
        Ok(program) => program,
        Err(status) => {
            debug!("not running: {status:?}");
            return status;
        },
    };

    if interpreter.interpret(&program, reporter) {
        RunStatus::Completed
    } else {
        RunStatus::RuntimeError
    }
}
