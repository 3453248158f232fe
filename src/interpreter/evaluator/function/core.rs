use log::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            environment::Environment,
            function::{len, set},
            signal::Signal,
        },
        lexer::Token,
        value::{
            callable::{Builtin, Callable, Function},
            core::Value,
        },
    },
};

/// Defines the builtin functions as a static lookup table.
///
/// Each entry provides:
/// - the global name the builtin is bound to,
/// - its exact arity,
/// - a function pointer implementing it.
///
/// The macro produces `BUILTIN_TABLE`, which the interpreter walks at
/// construction to bind every builtin in the global scope, and
/// `BUILTIN_FUNCTIONS`, the list of their names.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "len" => { arity: 1, func: len::len },
    "set" => { arity: 3, func: set::set },
}

impl Interpreter<'_> {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then every argument from left to
    /// right, and only then is the callee checked.
    pub(in crate::interpreter::evaluator) fn evaluate_call(&mut self,
                                                           callee: &Expr,
                                                           arguments: &[Expr],
                                                           paren: &Token)
                                                           -> EvalResult<Value> {
        let callee = self.evaluate(callee)?;
        let arguments = arguments.iter()
                                 .map(|argument| self.evaluate(argument))
                                 .collect::<EvalResult<Vec<_>>>()?;
        self.call(&callee, &arguments, paren)
    }

    /// Calls `callee` with already evaluated arguments.
    ///
    /// The argument count must match the callee's arity exactly. Faults
    /// raised by a builtin are reported at `paren`, the call's closing
    /// parenthesis.
    ///
    /// # Errors
    /// - [`RuntimeError::NotCallable`] if `callee` is not a function.
    /// - [`RuntimeError::ArgumentCountMismatch`] on an arity mismatch.
    /// - [`RuntimeError::Execution`] if a builtin rejects its arguments.
    /// - Any fault raised while running a user-defined function's body.
    pub fn call(&mut self, callee: &Value, arguments: &[Value], paren: &Token) -> EvalResult<Value> {
        let Value::Callable(callable) = callee else {
            return Err(RuntimeError::NotCallable { found: callee.type_name(),
                                                   paren: paren.clone(), });
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: callable.arity(),
                                                             found:    arguments.len(),
                                                             paren:    paren.clone(), });
        }

        match callable {
            Callable::Builtin(builtin) => {
                trace!("calling builtin '{}'", builtin.name);
                (builtin.func)(self, arguments).map_err(|error| {
                                                    RuntimeError::Execution { message: error.to_string(),
                                                                              paren:   paren.clone(), }
                                                })
            },
            Callable::Function(function) => self.call_function(function, arguments, paren),
        }
    }

    /// Runs a user-defined function.
    ///
    /// The call gets a fresh scope whose parent is the closure's captured
    /// scope, not the caller's, which is what makes scoping lexical. Each
    /// parameter is bound to its argument there before the body runs.
    fn call_function(&mut self,
                     function: &Function,
                     arguments: &[Value],
                     paren: &Token)
                     -> EvalResult<Value> {
        if self.depth >= self.max_call_depth {
            return Err(RuntimeError::StackOverflow { limit: self.max_call_depth,
                                                     paren: paren.clone(), });
        }
        trace!("calling function '{}'", function.name().unwrap_or("<anonymous>"));

        let scope = Environment::child(&function.closure);
        {
            let mut scope = scope.borrow_mut();
            for (param, argument) in function.declaration.params.iter().zip(arguments) {
                scope.define(param.lexeme.clone(), argument.clone());
            }
        }

        self.depth += 1;
        let result = self.execute_block(&function.declaration.body, scope);
        self.depth -= 1;

        match result? {
            Signal::Normal => Ok(Value::Nil),
            Signal::Return { value, .. } => Ok(value),
            Signal::Break { keyword } => Err(RuntimeError::BreakOutsideLoop { keyword }),
        }
    }
}
