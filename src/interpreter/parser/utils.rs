use std::mem::discriminant;

use crate::{
    error::{ParseError, SpanMode},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{MAX_NESTING_DEPTH, ParseResult, Parser},
    },
};

impl Parser<'_, '_> {
    /// The token under the cursor. Past the end this is always `Eof`.
    pub(super) fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    /// The most recently consumed token, or the current one if nothing has
    /// been consumed yet.
    pub(super) fn previous(&self) -> &Token {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or_else(|| self.peek())
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Consumes the current token and returns it. Never moves past `Eof`.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Whether the current token has the same kind as `kind`. Literal
    /// payloads are ignored, so `Number(0.0)` matches any number.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        discriminant(&self.peek().kind) == discriminant(kind)
    }

    /// Like [`Self::check`], one token ahead.
    pub(super) fn check_next(&self, kind: &TokenKind) -> bool {
        self.tokens
            .get(self.current + 1)
            .is_some_and(|token| discriminant(&token.kind) == discriminant(kind))
    }

    /// Consumes the current token if it is any of `kinds`.
    pub(super) fn matches(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if self.is_at_end() {
            return None;
        }
        if kinds.iter().any(|kind| self.check(kind)) {
            return Some(self.advance());
        }
        None
    }

    /// Consumes a token of `kind` or fails with `message`.
    ///
    /// The error is positioned at the previous token, since the fault is that
    /// something is missing after it.
    ///
    /// # Errors
    /// Returns a `ParseError` if the current token is not of `kind`.
    pub(super) fn consume(&mut self,
                          kind: &TokenKind,
                          message: &str,
                          mode: SpanMode)
                          -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(Self::error(self.previous(), message, mode))
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// The depth is restored afterwards whether or not `parse` succeeds.
    ///
    /// # Errors
    /// Fails with `message` at the current token if the nesting limit has
    /// been reached, otherwise propagates any error from `parse`.
    pub(super) fn nested<T>(&mut self,
                            message: &str,
                            parse: fn(&mut Self) -> ParseResult<T>)
                            -> ParseResult<T> {
        let depth = self.depth;
        let result = self.descend(message).and_then(|()| parse(self));
        self.depth = depth;
        result
    }

    /// Enters one more nesting level without restoring it. Callers save and
    /// restore [`Self::depth`] themselves.
    pub(super) fn descend(&mut self, message: &str) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Self::error(self.peek(), message, SpanMode::Cover));
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn error(token: &Token, message: &str, mode: SpanMode) -> ParseError {
        ParseError::new(token.clone(), message, mode)
    }

    /// Parses a comma-separated list of items, stopping before `closing`.
    ///
    /// This utility is shared by parameter lists, argument lists and array
    /// literals. An immediately encountered closing token produces an empty
    /// list. The closing token itself is left for the caller to consume with
    /// its own error message.
    ///
    /// Grammar (simplified): `list := (item ("," item)*)?`
    ///
    /// # Errors
    /// Propagates any error from `parse_item`.
    pub(super) fn comma_separated<T>(&mut self,
                                     closing: &TokenKind,
                                     parse_item: fn(&mut Self) -> ParseResult<T>)
                                     -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.check(closing) {
            return Ok(items);
        }
        loop {
            items.push(parse_item(self)?);
            if self.matches(&[TokenKind::Comma]).is_none() {
                break;
            }
        }
        Ok(items)
    }
}
