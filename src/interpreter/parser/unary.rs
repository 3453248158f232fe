use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::SpanMode,
    interpreter::{
        lexer::TokenKind,
        parser::core::{EXPRESSION_TOO_DEEP, ParseResult, Parser},
    },
};

impl Parser<'_, '_> {
    /// Parses a prefix `!` or `-` expression.
    ///
    /// Prefix operators nest, so `!!x` and `--x` are accepted.
    ///
    /// Grammar: `unary := ("!" | "-") unary | index`
    pub(super) fn unary(&mut self) -> ParseResult<Expr> {
        if let Some(operator) = self.matches(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = match operator.kind {
                TokenKind::Bang => UnaryOperator::Not,
                _ => UnaryOperator::Negate,
            };
            let right = self.nested(EXPRESSION_TOO_DEEP, Self::unary)?;
            return Ok(Expr::Unary { op,
                                    operator,
                                    right: Box::new(right) });
        }
        self.index()
    }

    /// Parses an optional trailing index.
    ///
    /// Grammar: `index := call ("[" expression "]")?`
    fn index(&mut self) -> ParseResult<Expr> {
        let collection = self.call()?;
        if let Some(bracket) = self.matches(&[TokenKind::LeftSquare]) {
            let index = self.expression()?;
            self.consume(&TokenKind::RightSquare, "Expect ']' after index.", SpanMode::End)?;
            return Ok(Expr::Index { collection: Box::new(collection),
                                    index: Box::new(index),
                                    bracket });
        }
        Ok(collection)
    }

    /// Parses an optional trailing argument list.
    ///
    /// The closing parenthesis is kept on the node so arity and builtin
    /// faults can be reported at the call site.
    ///
    /// Grammar: `call := primary ("(" arguments? ")")?`
    fn call(&mut self) -> ParseResult<Expr> {
        let callee = self.primary()?;
        if self.matches(&[TokenKind::LeftParen]).is_some() {
            let arguments = self.comma_separated(&TokenKind::RightParen, Self::expression)?;
            let paren = self.consume(&TokenKind::RightParen,
                                     "Expect ')' after arguments.",
                                     SpanMode::End)?;
            return Ok(Expr::Call { callee: Box::new(callee),
                                   arguments,
                                   paren });
        }
        Ok(callee)
    }

    /// Parses a primary expression.
    ///
    /// Grammar:
    /// ```text
    /// primary := "true" | "false" | "nil" | NUMBER | STRING | IDENTIFIER
    ///          | "(" expression ")" | fn_literal | "[" elements? "]"
    /// ```
    ///
    /// # Errors
    /// Reports `Expect expression.` at the current token if none of the
    /// alternatives apply.
    fn primary(&mut self) -> ParseResult<Expr> {
        let value = match &self.peek().kind {
            TokenKind::True => Some(LiteralValue::Bool(true)),
            TokenKind::False => Some(LiteralValue::Bool(false)),
            TokenKind::Nil => Some(LiteralValue::Nil),
            TokenKind::Number(n) => Some(LiteralValue::Number(*n)),
            TokenKind::Str(s) => Some(LiteralValue::from(s.as_str())),
            _ => None,
        };
        if let Some(value) = value {
            self.advance();
            return Ok(Expr::Literal { value });
        }

        if let Some(name) = self.matches(&[TokenKind::Identifier]) {
            return Ok(Expr::Variable { name });
        }
        if self.matches(&[TokenKind::LeftParen]).is_some() {
            let expression = self.expression()?;
            self.consume(&TokenKind::RightParen,
                         "Expect ')' after expression.",
                         SpanMode::End)?;
            return Ok(Expr::Grouping { expression: Box::new(expression) });
        }
        if self.matches(&[TokenKind::Fn]).is_some() {
            return self.function_literal();
        }
        if self.matches(&[TokenKind::LeftSquare]).is_some() {
            return self.array_literal();
        }

        Err(Self::error(self.peek(), "Expect expression.", SpanMode::End))
    }

    /// Parses the elements of an array literal after its `[`.
    ///
    /// Grammar: `array := "[" (expression ("," expression)*)? "]"`
    fn array_literal(&mut self) -> ParseResult<Expr> {
        let elements = self.comma_separated(&TokenKind::RightSquare, Self::expression)?;
        self.consume(&TokenKind::RightSquare,
                     "Expect ']' after array elements.",
                     SpanMode::End)?;
        Ok(Expr::Array { elements })
    }
}
