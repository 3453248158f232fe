/// Numeric conversion helpers.
///
/// Runtime numbers are `f64`, while collections are addressed and measured
/// with `usize`. These helpers convert between the two without silent
/// truncation or rounding.
pub mod num;
