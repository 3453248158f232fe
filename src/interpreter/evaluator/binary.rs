use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        lexer::Token,
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated eagerly, left before right, then combined
    /// by [`apply_binary`].
    pub(in crate::interpreter::evaluator) fn evaluate_binary(&mut self,
                                                             left: &Expr,
                                                             op: BinaryOperator,
                                                             operator: &Token,
                                                             right: &Expr)
                                                             -> EvalResult<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        apply_binary(op, &left, &right, operator)
    }

    /// Evaluates `and` / `or` with short-circuiting.
    ///
    /// The result is always a boolean: `or` yields `true` as soon as the left
    /// side is truthy and `and` yields `false` as soon as it is falsy;
    /// otherwise the right side's truthiness decides.
    pub(in crate::interpreter::evaluator) fn evaluate_logical(&mut self,
                                                              left: &Expr,
                                                              op: LogicalOperator,
                                                              right: &Expr)
                                                              -> EvalResult<Value> {
        let left = self.evaluate(left)?.is_truthy();
        match (op, left) {
            (LogicalOperator::Or, true) => Ok(Value::Bool(true)),
            (LogicalOperator::And, false) => Ok(Value::Bool(false)),
            _ => Ok(Value::Bool(self.evaluate(right)?.is_truthy())),
        }
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// - `+` adds two numbers or concatenates two strings.
/// - `-`, `*`, `/` and the comparisons need two numbers. Division follows
///   IEEE 754, so dividing by zero yields an infinity or NaN.
/// - `==` and `!=` use structural equality and accept any operands.
///
/// # Errors
/// [`RuntimeError::TypeMismatch`] at `operator` for unsupported operand
/// types.
///
/// # Example
/// ```
/// use probe::{
///     ast::BinaryOperator,
///     interpreter::{
///         evaluator::binary::apply_binary,
///         lexer::{Token, TokenKind},
///         value::core::Value,
///     },
/// };
///
/// let plus = Token::new(TokenKind::Plus, "+", 1, 3);
/// let joined = apply_binary(BinaryOperator::Add, &Value::from("a"), &Value::from("b"), &plus);
///
/// assert_eq!(joined, Ok(Value::from("ab")));
/// assert!(apply_binary(BinaryOperator::Add, &Value::Number(1.0), &Value::from("a"), &plus).is_err());
/// ```
pub fn apply_binary(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    operator: &Token)
                    -> EvalResult<Value> {
    use BinaryOperator::{
        Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
    };
    use Value::{Bool, Number, Str};

    match (op, left, right) {
        (Equal, ..) => Ok(Bool(left == right)),
        (NotEqual, ..) => Ok(Bool(left != right)),
        (Add, Number(a), Number(b)) => Ok(Number(a + b)),
        (Add, Str(a), Str(b)) => Ok(Value::from(format!("{a}{b}"))),
        (Add, ..) => Err(mismatch("two numbers or two strings", op, left, right, operator)),
        (Sub, Number(a), Number(b)) => Ok(Number(a - b)),
        (Mul, Number(a), Number(b)) => Ok(Number(a * b)),
        (Div, Number(a), Number(b)) => Ok(Number(a / b)),
        (Less, Number(a), Number(b)) => Ok(Bool(a < b)),
        (LessEqual, Number(a), Number(b)) => Ok(Bool(a <= b)),
        (Greater, Number(a), Number(b)) => Ok(Bool(a > b)),
        (GreaterEqual, Number(a), Number(b)) => Ok(Bool(a >= b)),
        _ => Err(mismatch("numbers", op, left, right, operator)),
    }
}

fn mismatch(expected: &str,
            op: BinaryOperator,
            left: &Value,
            right: &Value,
            operator: &Token)
            -> RuntimeError {
    RuntimeError::TypeMismatch { details:  format!("Operands of '{op}' must be {expected}, found {} and {}.",
                                                   left.type_name(),
                                                   right.type_name()),
                                 operator: operator.clone(), }
}
