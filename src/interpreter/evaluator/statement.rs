use std::rc::Rc;

use log::trace;

use crate::{
    ast::{Expr, FunctionDecl, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            signal::Signal,
        },
        lexer::Token,
        value::{
            callable::{Callable, Function},
            core::Value,
        },
    },
};

impl Interpreter<'_> {
    /// Declares `name` in the current scope, `nil` when there is no
    /// initializer. Redeclaring a name in the same scope shadows it.
    pub(in crate::interpreter::evaluator) fn execute_var(&mut self,
                                                         name: &Token,
                                                         initializer: Option<&Expr>)
                                                         -> EvalResult<Signal> {
        let value = match initializer {
            Some(expression) => self.evaluate(expression)?,
            None => Value::Nil,
        };
        self.environment.borrow_mut().define(name.lexeme.clone(), value);
        Ok(Signal::Normal)
    }

    /// Writes the rendered value and a newline to the output sink.
    pub(in crate::interpreter::evaluator) fn execute_print(&mut self,
                                                           expression: &Expr,
                                                           keyword: &Token)
                                                           -> EvalResult<Signal> {
        let value = self.evaluate(expression)?;
        writeln!(self.out, "{value}").map_err(|error| {
                                         RuntimeError::Output { details: error.to_string(),
                                                                keyword: keyword.clone(), }
                                     })?;
        Ok(Signal::Normal)
    }

    pub(in crate::interpreter::evaluator) fn execute_if(&mut self,
                                                        condition: &Expr,
                                                        then_branch: &Stmt,
                                                        else_branch: Option<&Stmt>)
                                                        -> EvalResult<Signal> {
        if self.evaluate(condition)?.is_truthy() {
            self.execute(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.execute(else_branch)
        } else {
            Ok(Signal::Normal)
        }
    }

    /// Runs the loop until its condition turns falsy.
    ///
    /// A `break` from the body ends this loop only. A `return` keeps
    /// unwinding to the enclosing call.
    pub(in crate::interpreter::evaluator) fn execute_while(&mut self,
                                                           condition: &Expr,
                                                           body: &Stmt)
                                                           -> EvalResult<Signal> {
        while self.evaluate(condition)?.is_truthy() {
            match self.execute(body)? {
                Signal::Normal => {},
                Signal::Break { .. } => break,
                signal @ Signal::Return { .. } => return Ok(signal),
            }
        }
        Ok(Signal::Normal)
    }

    /// Binds a named function in the current scope.
    ///
    /// The closure captures this same scope, so the function can refer to
    /// itself by name.
    pub(in crate::interpreter::evaluator) fn execute_function(&mut self,
                                                              declaration: &Rc<FunctionDecl>)
                                                              -> EvalResult<Signal> {
        let closure = self.make_closure(declaration);
        if let Some(name) = &declaration.name {
            trace!("declaring function '{}'", name.lexeme);
            self.environment.borrow_mut().define(name.lexeme.clone(), closure);
        }
        Ok(Signal::Normal)
    }

    /// Creates a closure over the current scope.
    ///
    /// The scope is captured by reference: later assignments to its
    /// variables are visible inside the function.
    pub(in crate::interpreter::evaluator) fn make_closure(&self,
                                                          declaration: &Rc<FunctionDecl>)
                                                          -> Value {
        let function = Function { declaration: Rc::clone(declaration),
                                  closure:     Rc::clone(&self.environment), };
        Value::Callable(Callable::Function(Rc::new(function)))
    }
}
