/// Runtime faults.
///
/// Contains the structured fault type raised during evaluation. Every
/// fault carries an error kind (the message); user-facing faults
/// additionally carry the source position and the literal source line so
/// diagnostics can point at the offending code.
pub mod runtime_error;

pub use runtime_error::{RuntimeError, RuntimeErrorKind, SourceContext};
