/// The runtime `Value` type.
///
/// Defines the tagged union every expression evaluates to, along with
/// truthiness, structural equality and the printed rendering.
pub mod core;
/// Callable values.
///
/// User-defined closures and native builtins, and the fixed-arity contract
/// they share.
pub mod callable;
