use crate::interpreter::{lexer::Token, value::core::Value};

/// How a statement finished executing.
///
/// `return` and `break` unwind by being handed back up through every
/// enclosing statement until a function call or loop consumes them.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Fell through; continue with the next statement.
    Normal,
    /// A `return` is unwinding to the nearest function call.
    Return {
        /// The returned value, `nil` for a bare `return;`.
        value:   Value,
        /// The `return` keyword, for reporting a return outside any function.
        keyword: Token,
    },
    /// A `break` is unwinding to the nearest loop.
    Break {
        /// The `break` keyword, for reporting a break outside any loop.
        keyword: Token,
    },
}
