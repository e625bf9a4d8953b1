/// Walks and executes parsed programs.
///
/// This module hosts the statement executor, expression evaluator, and
/// function-call mechanism that together form the runtime. Execution is
/// strictly sequential and depth-first recursive; all state lives in the
/// [`evaluator::core::Evaluator`].
pub mod evaluator;
/// The live output sink fed by display statements.
pub mod output;
/// Shared-ownership scope chain used for all name resolution.
pub mod scope;
/// Snapshot of the raw source text, serving per-line lookups for
/// diagnostics.
pub mod source;
/// Runtime value representations.
///
/// Declares the tagged `Value` variant set and the matrix type, along
/// with casting, truthiness, and display rules.
pub mod value;
