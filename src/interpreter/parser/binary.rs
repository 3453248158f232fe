use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::SpanMode,
    interpreter::{
        lexer::TokenKind,
        parser::core::{EXPRESSION_TOO_DEEP, ParseResult, Parser},
    },
};

impl Parser<'_, '_> {
    /// Parses an assignment, or falls through to a logical `or`.
    ///
    /// Assignment is right-associative: `a = b = c` assigns `c` to `b` and
    /// then to `a`. The left side is parsed as an ordinary expression first
    /// and must turn out to be a bare variable.
    ///
    /// Grammar: `assignment := IDENTIFIER "=" assignment | logic_or`
    ///
    /// # Errors
    /// Reports `Invalid assignment target.` at the `=` for any other left
    /// side.
    pub(super) fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.logic_or()?;

        if let Some(equals) = self.matches(&[TokenKind::Equal]) {
            let value = self.nested(EXPRESSION_TOO_DEEP, Self::assignment)?;
            return match expr {
                Expr::Variable { name } => Ok(Expr::Assign { name,
                                                             value: Box::new(value) }),
                _ => Err(Self::error(&equals, "Invalid assignment target.", SpanMode::End)),
            };
        }

        Ok(expr)
    }

    /// Grammar: `logic_or := logic_and ("or" logic_and)*`
    fn logic_or(&mut self) -> ParseResult<Expr> {
        self.logical_left_associative(Self::logic_and, &TokenKind::Or, LogicalOperator::Or)
    }

    /// Grammar: `logic_and := equality ("and" equality)*`
    fn logic_and(&mut self) -> ParseResult<Expr> {
        self.logical_left_associative(Self::equality, &TokenKind::And, LogicalOperator::And)
    }

    /// Grammar: `equality := comparison (("!=" | "==") comparison)*`
    fn equality(&mut self) -> ParseResult<Expr> {
        self.binary_left_associative(Self::comparison,
                                     &[BinaryOperator::NotEqual, BinaryOperator::Equal])
    }

    /// Grammar: `comparison := term ((">" | ">=" | "<" | "<=") term)*`
    fn comparison(&mut self) -> ParseResult<Expr> {
        self.binary_left_associative(Self::term,
                                     &[BinaryOperator::Greater,
                                       BinaryOperator::GreaterEqual,
                                       BinaryOperator::Less,
                                       BinaryOperator::LessEqual])
    }

    /// Grammar: `term := factor (("+" | "-") factor)*`
    fn term(&mut self) -> ParseResult<Expr> {
        self.binary_left_associative(Self::factor, &[BinaryOperator::Add, BinaryOperator::Sub])
    }

    /// Grammar: `factor := unary (("*" | "/") unary)*`
    fn factor(&mut self) -> ParseResult<Expr> {
        self.binary_left_associative(Self::unary, &[BinaryOperator::Mul, BinaryOperator::Div])
    }

    /// Parses one left-associative precedence level.
    ///
    /// Keeps folding `left op right` into the left operand as long as the
    /// current token is one of `operators`. Every fold makes the tree one
    /// level deeper, so it counts against the nesting limit.
    fn binary_left_associative(&mut self,
                               operand: fn(&mut Self) -> ParseResult<Expr>,
                               operators: &[BinaryOperator])
                               -> ParseResult<Expr> {
        let depth = self.depth;
        let result = self.binary_chain(operand, operators);
        self.depth = depth;
        result
    }

    fn binary_chain(&mut self,
                    operand: fn(&mut Self) -> ParseResult<Expr>,
                    operators: &[BinaryOperator])
                    -> ParseResult<Expr> {
        let mut left = operand(self)?;
        while let Some(op) = token_to_binary_operator(&self.peek().kind)
              && operators.contains(&op)
        {
            let operator = self.advance();
            self.descend(EXPRESSION_TOO_DEEP)?;
            let right = operand(self)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  operator,
                                  right: Box::new(right) };
        }
        Ok(left)
    }

    fn logical_left_associative(&mut self,
                                operand: fn(&mut Self) -> ParseResult<Expr>,
                                kind: &TokenKind,
                                op: LogicalOperator)
                                -> ParseResult<Expr> {
        let depth = self.depth;
        let result = self.logical_chain(operand, kind, op);
        self.depth = depth;
        result
    }

    fn logical_chain(&mut self,
                     operand: fn(&mut Self) -> ParseResult<Expr>,
                     kind: &TokenKind,
                     op: LogicalOperator)
                     -> ParseResult<Expr> {
        let mut left = operand(self)?;
        while let Some(operator) = self.matches(std::slice::from_ref(kind)) {
            self.descend(EXPRESSION_TOO_DEEP)?;
            let right = operand(self)?;
            left = Expr::Logical { left: Box::new(left),
                                   op,
                                   operator,
                                   right: Box::new(right) };
        }
        Ok(left)
    }
}

/// Maps a token to the binary operator it spells, if any.
///
/// # Example
/// ```
/// use probe::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&TokenKind::LessEqual),
///            Some(BinaryOperator::LessEqual));
/// assert_eq!(token_to_binary_operator(&TokenKind::Bang), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}
