use log::debug;

use crate::{
    ast::{Expr, Stmt},
    error::{ParseError, Reporter},
    interpreter::lexer::{Token, TokenKind},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// How deeply statements and expressions may nest inside one another.
///
/// Parsing and evaluation both recurse over the tree, so the limit keeps
/// pathological input from exhausting the native stack.
pub const MAX_NESTING_DEPTH: usize = 128;

pub(super) const STATEMENT_TOO_DEEP: &str = "Statement nested too deeply.";
pub(super) const EXPRESSION_TOO_DEEP: &str = "Expression nested too deeply.";

/// A recursive-descent parser over a scanned token list.
///
/// Syntax errors never abort parsing. Each one is reported, the declaration it
/// occurred in is dropped and the parser resynchronizes at the next statement
/// boundary, so a single pass surfaces as many errors as possible.
pub struct Parser<'t, 'r> {
    pub(super) tokens:  &'t [Token],
    pub(super) current: usize,
    /// Stands in for the end of input when the cursor runs past the list.
    pub(super) eof:     Token,
    /// Current nesting of statements and expressions.
    pub(super) depth:   usize,
    reporter:           &'r mut dyn Reporter,
    errors:             Vec<ParseError>,
}

impl<'t, 'r> Parser<'t, 'r> {
    #[must_use]
    pub fn new(tokens: &'t [Token], reporter: &'r mut dyn Reporter) -> Self {
        let eof = tokens.last()
                        .map_or_else(|| Token::new(TokenKind::Eof, "", 1, 1),
                                     |last| Token::new(TokenKind::Eof, "", last.line, last.column));
        Self { tokens,
               current: 0,
               eof,
               depth: 0,
               reporter,
               errors: Vec::new() }
    }

    /// Parses the whole token list into a program.
    ///
    /// Grammar: `program := declaration* EOF`
    ///
    /// Declarations that failed to parse are left out of the result; check
    /// [`Self::had_error`] before running it.
    ///
    /// # Example
    /// ```
    /// use probe::{
    ///     error::Diagnostics,
    ///     interpreter::{lexer::Lexer, parser::core::Parser},
    /// };
    ///
    /// let mut diagnostics = Diagnostics::new();
    /// let tokens = Lexer::new(&mut diagnostics).scan("var x = 1; print x;");
    /// let mut parser = Parser::new(&tokens, &mut diagnostics);
    /// let program = parser.parse();
    ///
    /// assert!(!parser.had_error());
    /// assert_eq!(program.len(), 2);
    /// ```
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        if self.tokens.is_empty() {
            return statements;
        }
        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        debug!("parsed {} statements, {} syntax errors", statements.len(), self.errors.len());
        statements
    }

    /// Whether any syntax error was reported.
    #[must_use]
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parses one declaration, recovering from any error inside it.
    ///
    /// Grammar: `declaration := var_decl | fn_decl | statement`
    ///
    /// # Returns
    /// The parsed statement, or `None` if it was malformed. In that case the
    /// error has been reported and the cursor moved past the bad input.
    pub(super) fn declaration(&mut self) -> Option<Stmt> {
        let start = self.current;
        match self.nested(STATEMENT_TOO_DEEP, Self::declaration_inner) {
            Ok(statement) => Some(statement),
            Err(error) => {
                self.reporter.report(&error.token, &error.message, error.mode);
                self.errors.push(error);
                self.synchronize();
                if self.current == start && !self.is_at_end() {
                    self.advance();
                }
                None
            },
        }
    }

    fn declaration_inner(&mut self) -> ParseResult<Stmt> {
        if self.matches(&[TokenKind::Var]).is_some() {
            return self.var_declaration();
        }
        if self.check(&TokenKind::Fn) && !self.check_next(&TokenKind::LeftParen) {
            self.advance();
            return self.function_declaration();
        }
        self.statement()
    }

    /// Skips tokens until a likely statement boundary: just past a `;`, or at
    /// a keyword that starts a statement.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if matches!(self.peek().kind,
                        TokenKind::Fn
                        | TokenKind::Var
                        | TokenKind::For
                        | TokenKind::If
                        | TokenKind::While
                        | TokenKind::Print
                        | TokenKind::Return)
            {
                return;
            }
            self.advance();
        }
    }

    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// lowest-precedence level, assignment, and recursively descends through
    /// the precedence hierarchy.
    ///
    /// Grammar: `expression := assignment`
    ///
    /// # Errors
    /// Reports `Expression nested too deeply.` past [`MAX_NESTING_DEPTH`].
    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        self.nested(EXPRESSION_TOO_DEEP, Self::assignment)
    }
}
