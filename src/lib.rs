//! # kestrel
//!
//! kestrel is the runtime evaluator for the kestrel scripting language, a
//! small imperative language with lexical scoping, closures, matrices,
//! and structured, position-aware diagnostics.
//!
//! The crate consumes an abstract syntax tree built by an external front
//! end and executes it, producing an ordered textual output log. Lexing
//! and parsing are deliberately out of scope: the [`ast`] module defines
//! the node shapes a front end must produce, and
//! [`interpreter::source::SourceText`] carries the raw source lines the
//! evaluator quotes in diagnostics.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::Evaluator, source::SourceText},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expr` enums and related
/// types that represent the syntactic structure of source code as a
/// tree. The tree is built by an external front end and traversed by the
/// evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to every node for error reporting.
/// - Fixes the node shapes the front end and evaluator agree on.
pub mod ast;
/// Provides the structured runtime fault type.
///
/// This module defines all faults that can be raised during evaluation.
/// It standardizes error reporting and carries detailed information
/// about failures, including fault kinds, source positions, the literal
/// offending line, and per-kind suggestions.
///
/// # Responsibilities
/// - Defines the error kind enum covering every fault condition.
/// - Attaches line/column/source-line context for user-facing rendering.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the execution of parsed programs.
///
/// This module ties together the value model, the scope chain, the
/// statement executor, the expression evaluator, the function-call
/// mechanism, and the output log to provide a complete runtime for
/// syntax trees.
///
/// # Responsibilities
/// - Coordinates all core components of the evaluator.
/// - Provides the entry points for running programs.
/// - Manages control-flow signals and fault propagation between phases.
pub mod interpreter;

/// Evaluates a program and returns its output log.
///
/// This is the main convenience entry point: it builds an
/// [`Evaluator`] with the default configuration (stdout sink, unlimited
/// call depth), runs every top-level statement in order, and hands back
/// the accumulated output lines. Callers that need initial bindings, a
/// different sink, or the partial log after a fault should drive
/// [`Evaluator`] directly.
///
/// # Errors
/// Returns the first unrecovered [`RuntimeError`]; evaluation stops
/// there.
///
/// # Examples
/// ```
/// use kestrel::{
///     ast::{AssignTarget, BinaryOperator, Expr, Pos, Program, Statement},
///     evaluate,
///     interpreter::source::SourceText,
/// };
///
/// // set x = 40
/// // display x + 2
/// let source = "set x = 40\ndisplay x + 2";
/// let program = Program::new(vec![
///     Statement::Declare { target:        AssignTarget::plain("x".to_string()),
///                          declared_type: None,
///                          value:         Expr::Literal { value: 40.into(),
///                                                         pos:   Pos::new(1, 8), },
///                          pos:           Pos::new(1, 0), },
///     Statement::Display { values: vec![Expr::Binary { left:  Box::new(Expr::Identifier { name: "x".to_string(),
///                                                                                         pos:  Pos::new(2, 8), }),
///                                                      op:    BinaryOperator::Add,
///                                                      right: Box::new(Expr::Literal { value: 2.into(),
///                                                                                      pos:   Pos::new(2, 12), }),
///                                                      pos:   Pos::new(2, 8), }],
///                          pos:    Pos::new(2, 0), },
/// ]);
///
/// let output = evaluate(&program, SourceText::new(source)).unwrap();
/// assert_eq!(output, ["42"]);
/// ```
pub fn evaluate(program: &ast::Program, source: SourceText) -> Result<Vec<String>, RuntimeError> {
    let mut evaluator = Evaluator::new(source);
    evaluator.run(program)?;
    Ok(evaluator.into_output())
}
