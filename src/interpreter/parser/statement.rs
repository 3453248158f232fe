use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDecl, LiteralValue, Stmt},
    error::SpanMode,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser, STATEMENT_TOO_DEEP},
    },
};

impl Parser<'_, '_> {
    /// Parses a statement that is not a declaration.
    ///
    /// Grammar:
    /// ```text
    /// statement := print | if | while | for | return | break | block
    ///            | expression_statement
    /// ```
    pub(super) fn statement(&mut self) -> ParseResult<Stmt> {
        if let Some(keyword) = self.matches(&[TokenKind::Print]) {
            return self.print_statement(keyword);
        }
        if self.matches(&[TokenKind::If]).is_some() {
            return self.if_statement();
        }
        if self.matches(&[TokenKind::While]).is_some() {
            return self.while_statement();
        }
        if self.matches(&[TokenKind::For]).is_some() {
            return self.for_statement();
        }
        if let Some(keyword) = self.matches(&[TokenKind::Return]) {
            return self.return_statement(keyword);
        }
        if let Some(keyword) = self.matches(&[TokenKind::Break]) {
            self.consume(&TokenKind::Semicolon, "Expect ';' after 'break'.", SpanMode::End)?;
            return Ok(Stmt::Break { keyword });
        }
        if self.check(&TokenKind::LeftBrace) {
            return Ok(Stmt::Block { statements: self.block()? });
        }
        self.expression_statement()
    }

    /// Parses a variable declaration after its `var` keyword.
    ///
    /// Grammar: `var_decl := "var" IDENTIFIER ("=" expression)? ";"`
    pub(super) fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(&TokenKind::Identifier, "Expect variable name.", SpanMode::End)?;
        let initializer = match self.matches(&[TokenKind::Equal]) {
            Some(_) => Some(self.expression()?),
            None => None,
        };
        self.consume(&TokenKind::Semicolon,
                     "Expect ';' after variable declaration.",
                     SpanMode::End)?;
        Ok(Stmt::Var { name, initializer })
    }

    /// Parses a named function declaration after its `fn` keyword.
    ///
    /// Grammar: `fn_decl := "fn" IDENTIFIER "(" parameters? ")" block`
    pub(super) fn function_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(&TokenKind::Identifier, "Expect function name.", SpanMode::End)?;
        self.consume(&TokenKind::LeftParen,
                     "Expect '(' after function name.",
                     SpanMode::End)?;
        let declaration = self.function_rest(Some(name))?;
        Ok(Stmt::Function(Rc::new(declaration)))
    }

    /// Parses an anonymous function literal after its `fn` keyword.
    ///
    /// Grammar: `fn_literal := "fn" "(" parameters? ")" block`
    ///
    /// # Errors
    /// Naming the function is an error reported over the name.
    pub(super) fn function_literal(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Identifier) {
            return Err(Self::error(self.peek(),
                                   "Anonymous function can't have a name.",
                                   SpanMode::Cover));
        }
        self.consume(&TokenKind::LeftParen, "Expect '(' after 'fn'.", SpanMode::End)?;
        let declaration = self.function_rest(None)?;
        Ok(Expr::Function(Rc::new(declaration)))
    }

    /// Parses the parameter list and body shared by both function forms,
    /// starting just after the opening parenthesis.
    fn function_rest(&mut self, name: Option<Token>) -> ParseResult<FunctionDecl> {
        let params = self.comma_separated(&TokenKind::RightParen, |parser| {
                             parser.consume(&TokenKind::Identifier,
                                            "Expect parameter name.",
                                            SpanMode::End)
                         })?;
        self.consume(&TokenKind::RightParen,
                     "Expect ')' after parameters.",
                     SpanMode::End)?;
        let body = self.block()?;
        Ok(FunctionDecl { name, params, body })
    }

    fn print_statement(&mut self, keyword: Token) -> ParseResult<Stmt> {
        let expression = self.expression()?;
        self.consume(&TokenKind::Semicolon, "Expect ';' after value.", SpanMode::End)?;
        Ok(Stmt::Print { expression, keyword })
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(&TokenKind::LeftParen, "Expect '(' after 'if'.", SpanMode::End)?;
        let condition = self.expression()?;
        self.consume(&TokenKind::RightParen,
                     "Expect ')' after if condition.",
                     SpanMode::End)?;
        let then_branch = Box::new(self.nested(STATEMENT_TOO_DEEP, Self::statement)?);
        let else_branch = match self.matches(&[TokenKind::Else]) {
            Some(_) => Some(Box::new(self.nested(STATEMENT_TOO_DEEP, Self::statement)?)),
            None => None,
        };
        Ok(Stmt::If { condition,
                      then_branch,
                      else_branch })
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(&TokenKind::LeftParen, "Expect '(' after 'while'.", SpanMode::End)?;
        let condition = self.expression()?;
        self.consume(&TokenKind::RightParen,
                     "Expect ')' after while condition.",
                     SpanMode::End)?;
        let body = Box::new(self.nested(STATEMENT_TOO_DEEP, Self::statement)?);
        Ok(Stmt::While { condition, body })
    }

    /// Parses a `for` loop and desugars it into a `while` loop.
    ///
    /// `for (init; cond; incr) body` becomes
    /// `{ init; while (cond) { body; incr; } }`. A missing condition is
    /// `true`; a missing initializer or increment is simply left out.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(&TokenKind::LeftParen, "Expect '(' after 'for'.", SpanMode::End)?;

        let initializer = if self.matches(&[TokenKind::Semicolon]).is_some() {
            None
        } else if self.matches(&[TokenKind::Var]).is_some() {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.check(&TokenKind::Semicolon) {
            Expr::Literal { value: LiteralValue::Bool(true) }
        } else {
            self.expression()?
        };
        self.consume(&TokenKind::Semicolon,
                     "Expect ';' after loop condition.",
                     SpanMode::End)?;

        let increment = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(&TokenKind::RightParen,
                     "Expect ')' after for clauses.",
                     SpanMode::End)?;

        let mut body = self.nested(STATEMENT_TOO_DEEP, Self::statement)?;
        if let Some(expression) = increment {
            body = Stmt::Block { statements: vec![body, Stmt::Expression { expression }] };
        }
        body = Stmt::While { condition,
                             body: Box::new(body) };
        if let Some(initializer) = initializer {
            body = Stmt::Block { statements: vec![initializer, body] };
        }
        Ok(body)
    }

    fn return_statement(&mut self, keyword: Token) -> ParseResult<Stmt> {
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(&TokenKind::Semicolon,
                     "Expect ';' after return value.",
                     SpanMode::End)?;
        Ok(Stmt::Return { keyword, value })
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expression = self.expression()?;
        self.consume(&TokenKind::Semicolon,
                     "Expect ';' after expression.",
                     SpanMode::End)?;
        Ok(Stmt::Expression { expression })
    }
}
