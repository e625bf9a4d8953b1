/// Binary operator semantics.
///
/// Split by operator family: arithmetic in `numeric`, ordering and
/// equality in `comparison`.
pub mod binary;
/// Statement blocks, branching, and loops.
///
/// Implements if/else-if/else relay semantics, while and for loops with
/// their per-iteration scopes, and the block executor that threads the
/// explicit scope-mode parameter.
pub mod control;
/// The evaluator state and statement dispatch.
///
/// Defines the `Evaluator`, the `Flow` control-flow signal, and the
/// top-level program loop that accumulates the output log.
pub mod core;
/// Expression dispatch.
///
/// Evaluates literals, identifier lookups (plain and explicit-parent),
/// short-circuit logic, matrix construction and operators, and casts.
pub mod expr;
/// User-defined function registry, call mechanism, and built-ins.
pub mod function;
/// Unary operator semantics.
pub mod unary;
