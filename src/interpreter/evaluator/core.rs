use std::{io::Write, mem};

use log::{debug, warn};

use crate::{
    ast::{Expr, Stmt},
    error::{Reporter, RuntimeError},
    interpreter::{
        evaluator::{
            environment::{EnvRef, Environment},
            function::core::BUILTIN_TABLE,
            signal::Signal,
        },
        value::{callable::Callable, core::Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 200;

/// A tree-walking interpreter.
///
/// Holds the global scope, the scope currently executing and the sink that
/// `print` writes to. Globals persist across calls to [`Self::interpret`], so
/// one interpreter can run a program in several pieces.
pub struct Interpreter<'a> {
    pub(in crate::interpreter::evaluator) environment:    EnvRef,
    pub(in crate::interpreter::evaluator) globals:        EnvRef,
    pub(in crate::interpreter::evaluator) out:            &'a mut dyn Write,
    pub(in crate::interpreter::evaluator) depth:          usize,
    pub(in crate::interpreter::evaluator) max_call_depth: usize,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter that prints to `out`, with every builtin bound
    /// in the global scope.
    #[must_use]
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self::with_max_call_depth(out, DEFAULT_MAX_CALL_DEPTH)
    }

    /// Like [`Self::new`], with a custom limit on nested function calls.
    /// Calls nested deeper fail with [`RuntimeError::StackOverflow`].
    #[must_use]
    pub fn with_max_call_depth(out: &'a mut dyn Write, max_call_depth: usize) -> Self {
        let globals = Environment::new().into_ref();
        for builtin in BUILTIN_TABLE {
            globals.borrow_mut()
                   .define(builtin.name, Value::Callable(Callable::Builtin(builtin)));
        }
        debug!("registered {} builtins", BUILTIN_TABLE.len());

        Self { environment: globals.clone(),
               globals,
               out,
               depth: 0,
               max_call_depth }
    }

    /// Looks up a global binding by name.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().lookup(name)
    }

    /// Runs a program, reporting the first runtime fault.
    ///
    /// A fault aborts the remaining statements. It is handed to `reporter`
    /// and never returned or panicked on.
    ///
    /// # Returns
    /// `true` if every statement ran, `false` if a fault stopped the program.
    ///
    /// # Example
    /// ```
    /// use probe::{
    ///     error::Diagnostics, interpreter::evaluator::core::Interpreter, parse_program,
    /// };
    ///
    /// let mut diagnostics = Diagnostics::new();
    /// let program = parse_program("print 1 + 2; print x; print 3;", &mut diagnostics).unwrap();
    ///
    /// let mut out = Vec::new();
    /// let completed = Interpreter::new(&mut out).interpret(&program, &mut diagnostics);
    ///
    /// assert!(!completed);
    /// assert_eq!(String::from_utf8(out).unwrap(), "3\n");
    /// assert_eq!(diagnostics.messages(), vec!["Undefined variable 'x'."]);
    /// ```
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut dyn Reporter) -> bool {
        match self.execute_program(statements) {
            Ok(()) => true,
            Err(error) => {
                warn!("program aborted: {error}");
                reporter.report(error.token(), &error.to_string(), error.mode());
                false
            },
        }
    }

    /// Runs a program, returning the first runtime fault instead of reporting
    /// it.
    ///
    /// A `return` or `break` that unwinds all the way to the top level is a
    /// fault.
    ///
    /// # Errors
    /// The fault that aborted the program.
    pub fn execute_program(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        for statement in statements {
            match self.execute(statement)? {
                Signal::Normal => {},
                Signal::Return { keyword, .. } => {
                    return Err(RuntimeError::ReturnOutsideFunction { keyword });
                },
                Signal::Break { keyword } => return Err(RuntimeError::BreakOutsideLoop { keyword }),
            }
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation; it dispatches
    /// on the expression variant.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value } => Ok(Value::from(value)),
            Expr::Binary { left,
                           op,
                           operator,
                           right, } => self.evaluate_binary(left, *op, operator, right),
            Expr::Unary { op, operator, right } => self.evaluate_unary(*op, operator, right),
            Expr::Variable { name } => self.environment.borrow().get(name),
            Expr::Grouping { expression } => self.evaluate(expression),
            Expr::Assign { name, value } => self.evaluate_assign(name, value),
            Expr::Logical { left, op, right, .. } => self.evaluate_logical(left, *op, right),
            Expr::Call { callee,
                         arguments,
                         paren, } => self.evaluate_call(callee, arguments, paren),
            Expr::Array { elements } => self.evaluate_array(elements),
            Expr::Index { collection,
                          index,
                          bracket, } => self.evaluate_index(collection, index, bracket),
            Expr::Function(declaration) => Ok(self.make_closure(declaration)),
        }
    }

    /// Executes a single statement.
    ///
    /// # Returns
    /// [`Signal::Normal`] when execution falls through, otherwise the
    /// `return` or `break` that is unwinding through this statement.
    pub fn execute(&mut self, statement: &Stmt) -> EvalResult<Signal> {
        match statement {
            Stmt::Var { name, initializer } => self.execute_var(name, initializer.as_ref()),
            Stmt::Print { expression, keyword } => self.execute_print(expression, keyword),
            Stmt::If { condition,
                       then_branch,
                       else_branch, } => {
                self.execute_if(condition, then_branch, else_branch.as_deref())
            },
            Stmt::While { condition, body } => self.execute_while(condition, body),
            Stmt::Expression { expression } => {
                self.evaluate(expression)?;
                Ok(Signal::Normal)
            },
            Stmt::Return { keyword, value } => {
                let value = match value {
                    Some(expression) => self.evaluate(expression)?,
                    None => Value::Nil,
                };
                Ok(Signal::Return { value,
                                    keyword: keyword.clone() })
            },
            Stmt::Block { statements } => {
                let scope = Environment::child(&self.environment);
                self.execute_block(statements, scope)
            },
            Stmt::Function(declaration) => self.execute_function(declaration),
            Stmt::Break { keyword } => Ok(Signal::Break { keyword: keyword.clone() }),
        }
    }

    /// Executes `statements` with `environment` as the current scope.
    ///
    /// The previous scope is restored afterwards on every exit path: normal
    /// completion, a `return` or `break` signal, and a runtime fault.
    pub(in crate::interpreter::evaluator) fn execute_block(&mut self,
                                                           statements: &[Stmt],
                                                           environment: EnvRef)
                                                           -> EvalResult<Signal> {
        let previous = mem::replace(&mut self.environment, environment);
        let result = self.execute_sequence(statements);
        self.environment = previous;
        result
    }

    fn execute_sequence(&mut self, statements: &[Stmt]) -> EvalResult<Signal> {
        for statement in statements {
            let signal = self.execute(statement)?;
            if signal != Signal::Normal {
                return Ok(signal);
            }
        }
        Ok(Signal::Normal)
    }
}
