use std::{fmt, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{ast::LiteralValue, interpreter::value::callable::Callable};

/// Represents a runtime value in the interpreter.
///
/// Strings and arrays are reference counted, so copying a value never copies
/// its contents. Arrays are never mutated in place; `set` builds a new one.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value.
    Nil,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// An immutable UTF-8 string.
    Str(Rc<str>),
    /// A fixed-length, heterogeneous, 0-indexed array.
    Array(Rc<Vec<Self>>),
    /// A user-defined function or a builtin.
    Callable(Callable),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Nil => Self::Nil,
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Number(n) => (*n).into(),
            LiteralValue::Str(s) => Self::Str(Rc::clone(s)),
        }
    }
}

impl Value {
    /// Applies the language's truthiness rule.
    ///
    /// `nil` and `false` are falsy; every other value, including `0` and the
    /// empty string, is truthy.
    ///
    /// # Example
    /// ```
    /// use probe::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Nil.is_truthy());
    /// assert!(!Value::Bool(false).is_truthy());
    /// assert!(Value::Number(0.0).is_truthy());
    /// assert!(Value::from("").is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// The name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Callable(_) => "function",
        }
    }
}

/// Structural equality.
///
/// `nil` equals only `nil`. Numbers compare through [`OrderedFloat`], so
/// `NaN == NaN`. Arrays compare element-wise and callables by identity.
/// Values of different types are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b) || a == b,
            (Self::Callable(a), Self::Callable(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Callable(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_render_without_a_fraction() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn arrays_render_recursively() {
        let inner = Value::from(vec![Value::Number(1.0), Value::from("a")]);
        let outer = Value::from(vec![inner, Value::Nil, Value::Bool(true)]);
        assert_eq!(outer.to_string(), "[[1, a], nil, true]");
        assert_eq!(Value::from(Vec::new()).to_string(), "[]");
    }

    #[test]
    fn equality_is_structural_and_type_strict() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_eq!(Value::from(vec![Value::Number(1.0)]), Value::from(vec![Value::Number(1.0)]));
        assert_ne!(Value::Nil, Value::Bool(false));
        assert_ne!(Value::Number(0.0), Value::from("0"));
        assert_ne!(Value::from(vec![Value::Number(1.0)]), Value::from(vec![Value::Number(2.0)]));
    }

    #[test]
    fn literals_convert_to_values() {
        assert_eq!(Value::from(&LiteralValue::Nil), Value::Nil);
        assert_eq!(Value::from(&LiteralValue::from("x")), Value::from("x"));
        assert_eq!(Value::from(&LiteralValue::from(4.0)), Value::Number(4.0));
    }
}
