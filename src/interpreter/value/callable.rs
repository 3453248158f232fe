use std::{fmt, ptr, rc::Rc};

use crate::{
    ast::FunctionDecl,
    error::ExecutionResult,
    interpreter::{
        evaluator::{core::Interpreter, environment::EnvRef},
        value::core::Value,
    },
};

/// Signature of a native builtin.
///
/// Receives the interpreter and the already evaluated arguments, whose count
/// has been checked against the builtin's arity.
pub type BuiltinFn = fn(&mut Interpreter<'_>, &[Value]) -> ExecutionResult<Value>;

/// A native function.
pub struct Builtin {
    /// The global name the builtin is bound to.
    pub name:  &'static str,
    /// The exact number of arguments it takes.
    pub arity: usize,
    /// The implementation.
    pub func:  BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// A user-defined function closed over the scope it was declared in.
pub struct Function {
    /// The shared declaration node.
    pub declaration: Rc<FunctionDecl>,
    /// The environment that was current when the declaration was evaluated.
    pub closure:     EnvRef,
}

impl Function {
    /// The function's name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.declaration.name.as_ref().map(|t| t.lexeme.as_str())
    }
}

// The closure can reach this function again, so it is left out.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.name())
         .field("arity", &self.declaration.arity())
         .finish_non_exhaustive()
    }
}

/// Anything that can be called: a closure or a builtin.
#[derive(Debug, Clone)]
pub enum Callable {
    Function(Rc<Function>),
    Builtin(&'static Builtin),
}

impl Callable {
    /// The exact number of arguments a call must supply.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Function(function) => function.declaration.arity(),
            Self::Builtin(builtin) => builtin.arity,
        }
    }
}

/// Callables are equal only to themselves.
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(function) => match function.name() {
                Some(name) => write!(f, "<fn {name}>"),
                None => write!(f, "<fn>"),
            },
            Self::Builtin(builtin) => write!(f, "<native fn {}>", builtin.name),
        }
    }
}
