use std::io::{self, Write};

use crate::interpreter::lexer::Token;

/// How much of a token's source span a diagnostic should underline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanMode {
    /// Underline the whole lexeme.
    Cover,
    /// Mark the column just past the end of the lexeme. Used for "expected
    /// something after this" faults.
    End,
    /// Mark only the first character of the lexeme.
    Start,
    /// Underline the entire source line.
    FullLine,
}

impl SpanMode {
    /// Returns the 0-based, end-exclusive column range to underline.
    ///
    /// `line_width` is the length in characters of the line `token` sits on.
    ///
    /// # Example
    /// ```
    /// use probe::{
    ///     error::SpanMode,
    ///     interpreter::lexer::{Token, TokenKind},
    /// };
    ///
    /// let token = Token::new(TokenKind::Identifier, "abc", 1, 5);
    /// assert_eq!(SpanMode::Cover.columns(&token, 10), (4, 7));
    /// assert_eq!(SpanMode::End.columns(&token, 10), (7, 8));
    /// assert_eq!(SpanMode::Start.columns(&token, 10), (4, 5));
    /// assert_eq!(SpanMode::FullLine.columns(&token, 10), (0, 10));
    /// ```
    #[must_use]
    pub fn columns(self, token: &Token, line_width: usize) -> (usize, usize) {
        let start = token.column.saturating_sub(1);
        let width = token.lexeme.chars().count().max(1);
        match self {
            Self::Cover => (start, start + width),
            Self::End => (start + width, start + width + 1),
            Self::Start => (start, start + 1),
            Self::FullLine => (0, line_width.max(1)),
        }
    }
}

/// The channel through which every fault reaches the user.
///
/// The lexer, parser and evaluator never format or print diagnostics
/// themselves; they hand them to a `Reporter`.
pub trait Reporter {
    /// Reports a lexical fault at a raw 1-based line and column.
    fn report_lexical(&mut self, message: &str, line: usize, column: usize);

    /// Reports a syntax or runtime fault at `token`.
    fn report(&mut self, token: &Token, message: &str, mode: SpanMode);
}

/// Renders diagnostics against the source text.
///
/// Each diagnostic prints the message, the offending source line with a line
/// number gutter and a caret run underneath:
///
/// ```text
/// Error : Undefined variable 'x'.
///   3 | print x;
///             ^
/// ```
pub struct ConsoleReporter<W: Write> {
    lines: Vec<String>,
    out:   W,
}

impl ConsoleReporter<io::Stderr> {
    /// Creates a reporter that writes to standard error.
    #[must_use]
    pub fn stderr(source: &str) -> Self {
        Self::new(source, io::stderr())
    }
}

impl<W: Write> ConsoleReporter<W> {
    #[must_use]
    pub fn new(source: &str, out: W) -> Self {
        Self { lines: source.lines().map(str::to_owned).collect(),
               out }
    }

    /// Consumes the reporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line_text(&self, line: usize) -> &str {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map_or("", String::as_str)
    }

    // Diagnostics are best effort: a failing stderr has nowhere left to report to.
    fn emit(&mut self, message: &str, line: usize, (start, end): (usize, usize), suffix: &str) {
        let gutter = format!("  {line} | ");
        let text = self.line_text(line).to_owned();
        let padding = " ".repeat(gutter.len() + start);
        let carets = "^".repeat(end.saturating_sub(start));
        let _ = writeln!(self.out, "Error : {message}");
        let _ = writeln!(self.out, "{gutter}{text}");
        let _ = writeln!(self.out, "{padding}{carets}{suffix}");
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report_lexical(&mut self, message: &str, line: usize, column: usize) {
        let start = column.saturating_sub(1);
        self.emit(message, line, (start, start + 1), " Here");
    }

    fn report(&mut self, token: &Token, message: &str, mode: SpanMode) {
        let width = self.line_text(token.line).chars().count();
        let columns = mode.columns(token, width);
        self.emit(message, token.line, columns, "");
    }
}

/// A single reported fault, as recorded by [`Diagnostics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line:    usize,
    pub column:  usize,
    /// `None` for lexical faults, which are not tied to a token.
    pub mode:    Option<SpanMode>,
    /// The lexeme of the token the fault was reported at, if any.
    pub lexeme:  Option<String>,
}

/// Collects diagnostics in memory instead of printing them.
///
/// Useful for embedding hosts that render faults themselves, and for tests.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.message.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Reporter for Diagnostics {
    fn report_lexical(&mut self, message: &str, line: usize, column: usize) {
        self.entries.push(Diagnostic { message: message.to_owned(),
                                       line,
                                       column,
                                       mode: None,
                                       lexeme: None });
    }

    fn report(&mut self, token: &Token, message: &str, mode: SpanMode) {
        self.entries.push(Diagnostic { message: message.to_owned(),
                                       line: token.line,
                                       column: token.column,
                                       mode: Some(mode),
                                       lexeme: Some(token.lexeme.clone()) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::TokenKind;

    fn render(source: &str, token: &Token, mode: SpanMode) -> String {
        let mut reporter = ConsoleReporter::new(source, Vec::new());
        reporter.report(token, "boom", mode);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn cover_underlines_the_whole_lexeme() {
        let token = Token::new(TokenKind::Identifier, "foo", 1, 7);
        let output = render("print foo;", &token, SpanMode::Cover);
        assert_eq!(output, "Error : boom\n  1 | print foo;\n            ^^^\n");
    }

    #[test]
    fn end_marks_the_column_after_the_lexeme() {
        let token = Token::new(TokenKind::Number(1.0), "1", 1, 9);
        let output = render("var a = 1", &token, SpanMode::End);
        assert_eq!(output, "Error : boom\n  1 | var a = 1\n               ^\n");
    }

    #[test]
    fn lexical_faults_point_at_the_column() {
        let mut reporter = ConsoleReporter::new("a\nb @", Vec::new());
        reporter.report_lexical("Unexpected character '@'.", 2, 3);
        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output,
                   "Error : Unexpected character '@'.\n  2 | b @\n        ^ Here\n");
    }

    #[test]
    fn diagnostics_record_position_and_mode() {
        let mut diagnostics = Diagnostics::new();
        let token = Token::new(TokenKind::Semicolon, ";", 4, 2);
        diagnostics.report(&token, "Expect expression.", SpanMode::End);
        diagnostics.report_lexical("Unterminated string.", 5, 1);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.entries()[0].mode, Some(SpanMode::End));
        assert_eq!(diagnostics.entries()[0].lexeme.as_deref(), Some(";"));
        assert_eq!(diagnostics.entries()[1].line, 5);
        assert_eq!(diagnostics.messages(), vec!["Expect expression.", "Unterminated string."]);
    }
}
