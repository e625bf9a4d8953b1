/// The scalar value model.
///
/// Declares the `Value` enum covering every runtime type of the
/// language, along with truthiness coercion and the shared casting
/// routine used by cast expressions and declared-type annotations.
pub mod core;
/// The matrix value type.
///
/// A rectangular grid of numeric scalars with construction validation,
/// transposition, and closed-form 2x2 inversion.
pub mod matrix;
