use crate::{
    error::{ExecutionError, ExecutionResult},
    interpreter::{evaluator::core::Interpreter, value::core::Value},
    util::num::usize_to_f64_checked,
};

/// Returns the length of an array (in elements) or a string (in characters).
///
/// # Errors
/// [`ExecutionError::ExpectedCollection`] for any other argument.
///
/// # Example
/// ```
/// use probe::interpreter::{
///     evaluator::{core::Interpreter, function::len::len},
///     value::core::Value,
/// };
///
/// let mut out = Vec::new();
/// let mut interpreter = Interpreter::new(&mut out);
///
/// assert_eq!(len(&mut interpreter, &[Value::from("héllo")]), Ok(Value::Number(5.0)));
/// assert!(len(&mut interpreter, &[Value::Nil]).is_err());
/// ```
pub fn len(_: &mut Interpreter<'_>, args: &[Value]) -> ExecutionResult<Value> {
    let count = match args.first() {
        Some(Value::Array(elements)) => elements.len(),
        Some(Value::Str(s)) => s.chars().count(),
        other => {
            return Err(ExecutionError::ExpectedCollection { found: other.map_or("nothing",
                                                                                Value::type_name), });
        },
    };
    let length = usize_to_f64_checked(count, ExecutionError::LengthTooLarge { len: count })?;
    Ok(Value::Number(length))
}
