use crate::{
    ast::Stmt,
    error::SpanMode,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_, '_> {
    /// Parses a block delimited by braces.
    ///
    /// Grammar: `block := "{" declaration* "}"`
    ///
    /// Every inner declaration recovers from its own errors, so a malformed
    /// statement is dropped from the block and parsing continues with the
    /// next one.
    ///
    /// # Errors
    /// Fails if the opening or closing brace is missing.
    pub(super) fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.consume(&TokenKind::LeftBrace, "Expect '{' before block.", SpanMode::End)?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        self.consume(&TokenKind::RightBrace, "Expect '}' after block.", SpanMode::End)?;
        Ok(statements)
    }
}
