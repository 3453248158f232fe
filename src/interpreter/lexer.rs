use std::fmt;

use log::debug;
use logos::Logos;

use crate::error::{LexError, Reporter};

/// The kind of a lexical token.
///
/// Produced by the `logos` generated lexer. Keywords are exact tokens and
/// therefore take priority over the identifier pattern.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum TokenKind {
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `[`
    #[token("[")]
    LeftSquare,
    /// `]`
    #[token("]")]
    RightSquare,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `/`
    #[token("/")]
    Slash,
    /// `*`
    #[token("*")]
    Star,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,

    /// Identifiers such as `x` or `fib_2`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    /// String literals. The content between the quotes is taken verbatim;
    /// there are no escape sequences and a literal ends at its line.
    #[regex(r#""[^"\n]*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// Numeric literals such as `42` or `3.14`. A trailing `.` with no digit
    /// after it is not part of the number.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),

    /// `and`
    #[token("and")]
    And,
    /// `break`
    #[token("break")]
    Break,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `for`
    #[token("for")]
    For,
    /// `if`
    #[token("if")]
    If,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `or`
    #[token("or")]
    Or,
    /// `print`
    #[token("print")]
    Print,
    /// `return`
    #[token("return")]
    Return,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `while`
    #[token("while")]
    While,

    /// An opening quote with no closing quote on the same line. Never reaches
    /// the parser; the lexer reports it and drops it.
    #[regex(r#""[^"\n]*"#, allow_greedy = true)]
    UnterminatedString,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Spaces, tabs, carriage returns and newlines.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,

    /// End of input. Not produced by the generated lexer; appended by
    /// [`Lexer::scan`].
    Eof,
}

fn parse_string(lex: &logos::Lexer<TokenKind>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_owned()
}

fn parse_number(lex: &logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// A scanned token: its kind, the exact source text it came from and where
/// that text starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind:   TokenKind,
    /// The exact source substring the token was scanned from.
    pub lexeme: String,
    /// 1-based line of the first character.
    pub line:   usize,
    /// 1-based column of the first character, counted in characters.
    pub column: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self { kind,
               lexeme: lexeme.into(),
               line,
               column }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {:?} '{}'", self.line, self.column, self.kind, self.lexeme)
    }
}

/// Tracks line and column while walking forward through the source.
struct Position<'s> {
    source: &'s str,
    offset: usize,
    line:   usize,
    column: usize,
}

impl<'s> Position<'s> {
    const fn new(source: &'s str) -> Self {
        Self { source,
               offset: 0,
               line: 1,
               column: 1 }
    }

    /// Moves to byte `offset` and returns the line and column found there.
    fn advance_to(&mut self, offset: usize) -> (usize, usize) {
        for c in self.source[self.offset..offset].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = offset;
        (self.line, self.column)
    }
}

/// Converts source text into tokens.
///
/// Faults are reported through the [`Reporter`] as they are found and
/// scanning carries on, so one pass surfaces every lexical error.
pub struct Lexer<'r> {
    reporter: &'r mut dyn Reporter,
    errors:   Vec<LexError>,
}

impl<'r> Lexer<'r> {
    pub fn new(reporter: &'r mut dyn Reporter) -> Self {
        Self { reporter,
               errors: Vec::new() }
    }

    /// Scans `source` into tokens.
    ///
    /// The result always ends with a single [`TokenKind::Eof`] token
    /// positioned at the last line and column reached.
    ///
    /// # Example
    /// ```
    /// use probe::{
    ///     error::Diagnostics,
    ///     interpreter::lexer::{Lexer, TokenKind},
    /// };
    ///
    /// let mut diagnostics = Diagnostics::new();
    /// let mut lexer = Lexer::new(&mut diagnostics);
    /// let tokens = lexer.scan("print 1;");
    ///
    /// assert!(!lexer.had_error());
    /// assert_eq!(tokens[1].kind, TokenKind::Number(1.0));
    /// assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    /// ```
    pub fn scan(&mut self, source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut position = Position::new(source);
        let mut lexer = TokenKind::lexer(source);

        while let Some(result) = lexer.next() {
            let (line, column) = position.advance_to(lexer.span().start);
            match result {
                Ok(TokenKind::UnterminatedString) => {
                    self.error(LexError::unterminated_string(line, column));
                },
                Ok(kind) => tokens.push(Token::new(kind, lexer.slice(), line, column)),
                Err(()) => {
                    let character = lexer.slice().chars().next().unwrap_or('\u{fffd}');
                    self.error(LexError::unexpected_character(character, line, column));
                },
            }
        }

        let (line, column) = position.advance_to(source.len());
        tokens.push(Token::new(TokenKind::Eof, "", line, column));
        debug!("scanned {} tokens, {} lexical errors", tokens.len(), self.errors.len());
        tokens
    }

    /// Whether any lexical fault was reported.
    #[must_use]
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    fn error(&mut self, error: LexError) {
        self.reporter.report_lexical(&error.message, error.line, error.column);
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Diagnostics;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut diagnostics = Diagnostics::new();
        Lexer::new(&mut diagnostics).scan(source)
                                    .into_iter()
                                    .map(|t| t.kind)
                                    .collect()
    }

    #[test]
    fn operators_prefer_the_longest_match() {
        assert_eq!(kinds("! != = == < <= > >="),
                   vec![TokenKind::Bang,
                        TokenKind::BangEqual,
                        TokenKind::Equal,
                        TokenKind::EqualEqual,
                        TokenKind::Less,
                        TokenKind::LessEqual,
                        TokenKind::Greater,
                        TokenKind::GreaterEqual,
                        TokenKind::Eof]);
    }

    #[test]
    fn keywords_win_over_identifiers_only_on_exact_match() {
        assert_eq!(kinds("fn fnord break breaks"),
                   vec![TokenKind::Fn,
                        TokenKind::Identifier,
                        TokenKind::Break,
                        TokenKind::Identifier,
                        TokenKind::Eof]);
    }

    #[test]
    fn trailing_dot_is_not_part_of_a_number() {
        assert_eq!(kinds("12. 3.5"),
                   vec![TokenKind::Number(12.0),
                        TokenKind::Dot,
                        TokenKind::Number(3.5),
                        TokenKind::Eof]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("1 // two\n/ 3"),
                   vec![TokenKind::Number(1.0),
                        TokenKind::Slash,
                        TokenKind::Number(3.0),
                        TokenKind::Eof]);
    }

    #[test]
    fn strings_are_verbatim_and_end_at_their_line() {
        let mut diagnostics = Diagnostics::new();
        let mut lexer = Lexer::new(&mut diagnostics);
        let tokens = lexer.scan("\"a // b\" x\n\"open\n\"also open");

        assert_eq!(tokens[0].kind, TokenKind::Str("a // b".to_string()));
        assert_eq!(tokens[0].lexeme, "\"a // b\"");
        assert_eq!((tokens[1].line, tokens[1].column), (1, 10));
        assert_eq!(lexer.errors().len(), 2);
        assert_eq!((lexer.errors()[0].line, lexer.errors()[0].column), (2, 1));
        assert_eq!((lexer.errors()[1].line, lexer.errors()[1].column), (3, 1));
    }

    #[test]
    fn positions_are_one_based_character_columns() {
        let mut diagnostics = Diagnostics::new();
        let tokens = Lexer::new(&mut diagnostics).scan("var é = 1;\n  print x;");

        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        let print = tokens.iter().find(|t| t.kind == TokenKind::Print).unwrap();
        assert_eq!((print.line, print.column), (2, 3));
        let eof = tokens.last().unwrap();
        assert_eq!((eof.line, eof.column), (2, 11));
    }

    #[test]
    fn scanning_continues_past_errors() {
        let mut diagnostics = Diagnostics::new();
        let mut lexer = Lexer::new(&mut diagnostics);
        let tokens = lexer.scan("var a = 1 @ 2;\nvar b = # 3;\nprint \"open");

        assert!(lexer.had_error());
        assert_eq!(lexer.errors().len(), 3);
        assert_eq!(lexer.errors()[0].message, "Unexpected character '@'.");
        assert_eq!((lexer.errors()[0].line, lexer.errors()[0].column), (1, 11));
        assert_eq!(lexer.errors()[1].line, 2);
        assert_eq!(lexer.errors()[2].message, "Unterminated string.");
        assert_eq!((lexer.errors()[2].line, lexer.errors()[2].column), (3, 7));
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(diagnostics.len(), 3);
    }
}
