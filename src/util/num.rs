/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Why a number could not be used as an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// The number has a fractional part (or is NaN).
    Fractional,
    /// The number is integral but negative, infinite or not below the length.
    OutOfRange,
}

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use probe::util::num::{MAX_SAFE_U64_INT, usize_to_f64_checked};
///
/// assert_eq!(usize_to_f64_checked(3, "too big"), Ok(3.0));
///
/// let too_big = usize::try_from(MAX_SAFE_U64_INT + 1).unwrap();
/// assert_eq!(usize_to_f64_checked(too_big, "too big"), Err("too big"));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked<E>(value: usize, error: E) -> Result<f64, E> {
    match u64::try_from(value) {
        Ok(v) if v <= MAX_SAFE_U64_INT => Ok(v as f64),
        _ => Err(error),
    }
}

/// Converts a runtime number into an index into a collection of `len`
/// elements.
///
/// The number must be exactly integral. Negative values, infinities and values
/// at or past `len` are out of range.
///
/// ## Errors
/// - [`IndexError::Fractional`] for numbers with a fractional part and NaN.
/// - [`IndexError::OutOfRange`] for everything that is integral but does not
///   address an element.
///
/// ## Example
/// ```
/// use probe::util::num::{IndexError, f64_to_index};
///
/// assert_eq!(f64_to_index(1.0, 3), Ok(1));
/// assert_eq!(f64_to_index(1.5, 3), Err(IndexError::Fractional));
/// assert_eq!(f64_to_index(3.0, 3), Err(IndexError::OutOfRange));
/// assert_eq!(f64_to_index(-1.0, 3), Err(IndexError::OutOfRange));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_index(value: f64, len: usize) -> Result<usize, IndexError> {
    if value.is_infinite() {
        return Err(IndexError::OutOfRange);
    }
    if value.fract() != 0.0 || value.is_nan() {
        return Err(IndexError::Fractional);
    }
    if value < 0.0 || value >= len as f64 {
        return Err(IndexError::OutOfRange);
    }
    Ok(value as usize)
}
