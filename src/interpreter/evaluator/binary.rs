/// Ordering and equality comparisons.
pub mod comparison;
/// Dispatch from operator to operator family.
pub mod core;
/// Arithmetic operators, including string concatenation through `+` and
/// the integer/real division split.
pub mod numeric;
