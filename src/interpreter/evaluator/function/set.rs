use std::rc::Rc;

use crate::{
    error::{ExecutionError, ExecutionResult},
    interpreter::{evaluator::core::Interpreter, value::core::Value},
    util::num::{IndexError, f64_to_index},
};

/// `set(collection, index, value)`
///
/// For an array, returns a new array equal to `collection` except that the
/// element at `index` is `value`; the original array is left untouched. A
/// string is returned unchanged, whatever the other arguments are.
///
/// # Errors
/// - [`ExecutionError::ExpectedCollection`] if `collection` is neither an
///   array nor a string.
/// - [`ExecutionError::ExpectedNumber`], [`ExecutionError::FractionalIndex`]
///   or [`ExecutionError::IndexOutOfBounds`] for an unusable array index.
pub fn set(_: &mut Interpreter<'_>, args: &[Value]) -> ExecutionResult<Value> {
    let [collection, index, value] = args else {
        return Err(ExecutionError::ExpectedCollection { found: "nothing" });
    };

    let elements = match collection {
        Value::Str(_) => return Ok(collection.clone()),
        Value::Array(elements) => elements,
        other => return Err(ExecutionError::ExpectedCollection { found: other.type_name() }),
    };

    let Value::Number(index) = *index else {
        return Err(ExecutionError::ExpectedNumber { found: index.type_name() });
    };
    let position = f64_to_index(index, elements.len()).map_err(|error| match error {
                                                          IndexError::Fractional => {
                                                              ExecutionError::FractionalIndex { index }
                                                          },
                                                          IndexError::OutOfRange => {
                                                              ExecutionError::IndexOutOfBounds { index,
                                                                                                 len: elements.len() }
                                                          },
                                                      })?;

    let mut copy = elements.to_vec();
    if let Some(slot) = copy.get_mut(position) {
        *slot = value.clone();
    }
    Ok(Value::Array(Rc::new(copy)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Value {
        Value::from(values.iter().map(|n| Value::Number(*n)).collect::<Vec<_>>())
    }

    #[test]
    fn replaces_one_element_of_a_copy() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let original = numbers(&[1.0, 2.0, 3.0]);

        let updated = set(&mut interpreter, &[original.clone(), Value::Number(1.0), Value::Number(9.0)]);

        assert_eq!(updated, Ok(numbers(&[1.0, 9.0, 3.0])));
        assert_eq!(original, numbers(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn strings_are_returned_unchanged() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let result = set(&mut interpreter, &[Value::from("abc"), Value::Nil, Value::Nil]);

        assert_eq!(result, Ok(Value::from("abc")));
    }

    #[test]
    fn rejects_bad_collections_and_indices() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let array = numbers(&[1.0]);

        assert_eq!(set(&mut interpreter, &[Value::Nil, Value::Number(0.0), Value::Nil]),
                   Err(ExecutionError::ExpectedCollection { found: "nil" }));
        assert_eq!(set(&mut interpreter, &[array.clone(), Value::from("0"), Value::Nil]),
                   Err(ExecutionError::ExpectedNumber { found: "string" }));
        assert_eq!(set(&mut interpreter, &[array.clone(), Value::Number(0.5), Value::Nil]),
                   Err(ExecutionError::FractionalIndex { index: 0.5 }));
        assert_eq!(set(&mut interpreter, &[array, Value::Number(1.0), Value::Nil]),
                   Err(ExecutionError::IndexOutOfBounds { index: 1.0, len: 1 }));
    }
}
