use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        lexer::Token,
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a unary operation.
    ///
    /// - `-` negates a number and rejects every other type.
    /// - `!` negates the operand's truthiness, so it accepts any value.
    ///
    /// # Errors
    /// [`RuntimeError::TypeMismatch`] at `operator` when negating a
    /// non-number.
    pub(in crate::interpreter::evaluator) fn evaluate_unary(&mut self,
                                                            op: UnaryOperator,
                                                            operator: &Token,
                                                            right: &Expr)
                                                            -> EvalResult<Value> {
        let value = self.evaluate(right)?;

        match op {
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => {
                    Err(RuntimeError::TypeMismatch { details:  format!("Operand of '-' must be a number, found {}.",
                                                                       other.type_name()),
                                                     operator: operator.clone(), })
                },
            },
        }
    }
}
