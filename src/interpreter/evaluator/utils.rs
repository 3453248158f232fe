use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        lexer::Token,
        value::core::Value,
    },
    util::num::{IndexError, f64_to_index},
};

impl Interpreter<'_> {
    /// Evaluates `name = value` and returns the assigned value.
    ///
    /// The nearest existing binding of `name` is overwritten; assignment
    /// never declares a new variable.
    pub(in crate::interpreter::evaluator) fn evaluate_assign(&mut self,
                                                             name: &Token,
                                                             value: &Expr)
                                                             -> EvalResult<Value> {
        let value = self.evaluate(value)?;
        self.environment.borrow_mut().assign(name, value.clone())?;
        Ok(value)
    }

    /// Evaluates an array literal, elements left to right.
    pub(in crate::interpreter::evaluator) fn evaluate_array(&mut self,
                                                            elements: &[Expr])
                                                            -> EvalResult<Value> {
        let values = elements.iter()
                             .map(|element| self.evaluate(element))
                             .collect::<EvalResult<Vec<_>>>()?;
        Ok(Value::from(values))
    }

    /// Evaluates `collection[index]`.
    ///
    /// Both sides are evaluated before either is checked. The collection must
    /// be an array or a string and the index an integral number within
    /// bounds. Indexing a string yields a one-character string.
    pub(in crate::interpreter::evaluator) fn evaluate_index(&mut self,
                                                            collection: &Expr,
                                                            index: &Expr,
                                                            bracket: &Token)
                                                            -> EvalResult<Value> {
        let collection = self.evaluate(collection)?;
        let index = self.evaluate(index)?;

        let len = match &collection {
            Value::Array(elements) => elements.len(),
            Value::Str(s) => s.chars().count(),
            other => {
                return Err(RuntimeError::NotIndexable { found:   other.type_name(),
                                                        bracket: bracket.clone(), });
            },
        };
        let Value::Number(number) = index else {
            return Err(RuntimeError::NonNumericIndex { found:   index.type_name(),
                                                       bracket: bracket.clone(), });
        };
        let out_of_bounds = || RuntimeError::IndexOutOfBounds { index: number,
                                                                len,
                                                                bracket: bracket.clone() };
        let position = f64_to_index(number, len).map_err(|error| match error {
                                                     IndexError::Fractional => {
                                                         RuntimeError::FractionalIndex {
                                                             index: number,
                                                             bracket: bracket.clone(),
                                                         }
                                                     },
                                                     IndexError::OutOfRange => out_of_bounds(),
                                                 })?;

        match &collection {
            Value::Array(elements) => elements.get(position).cloned().ok_or_else(out_of_bounds),
            Value::Str(s) => s.chars()
                              .nth(position)
                              .map(|c| Value::from(c.to_string()))
                              .ok_or_else(out_of_bounds),
            _ => Err(out_of_bounds()),
        }
    }
}
