/// Call dispatch and the builtin table.
pub mod core;
/// The `len` builtin.
///
/// Returns the number of elements of an array or characters of a string.
pub mod len;
/// The `set` builtin.
///
/// Returns a copy of an array with one element replaced.
pub mod set;
