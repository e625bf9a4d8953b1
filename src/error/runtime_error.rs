use thiserror::Error;

/// Represents all faults that can occur during evaluation.
///
/// Each variant is one enumerable fault condition; the variant message is
/// the first line of the rendered diagnostic. Position and source-line
/// context live in [`RuntimeError`], which wraps a kind together with a
/// [`SourceContext`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    /// Read of a name not bound in any scope on the chain.
    #[error("Undefined variable '{name}'")]
    UndefinedVariable {
        /// The name that failed to resolve.
        name: String,
    },
    /// Assignment to a name no scope on the chain has declared.
    #[error("Variable '{name}' is not declared in any enclosing scope")]
    UndeclaredAssignment {
        /// The assignment target.
        name: String,
    },
    /// Redeclaration of a name already bound in the current scope.
    #[error("Variable '{name}' is already declared in this scope")]
    DuplicateDeclaration {
        /// The redeclared name.
        name: String,
    },
    /// Redeclaration of a name bound as a function parameter.
    #[error("Cannot redeclare parameter '{name}' in this scope")]
    ParameterRedeclaration {
        /// The parameter name.
        name: String,
    },
    /// Explicit-parent declaration of a name that a scope between the
    /// current scope and the target already binds.
    #[error("Cannot declare variable '{name}' in a parent scope while a nearer scope also binds it")]
    AmbiguousShadowedDeclaration {
        /// The shadowed name.
        name: String,
    },
    /// An explicit-parent reference walked past the global scope.
    #[error("No ancestor scope exists {levels} level(s) up while resolving '{name}'")]
    ScopeDepthExceeded {
        /// The referenced name.
        name:   String,
        /// How many parents the reference asked to skip.
        levels: usize,
    },
    /// Declaration of a function name that is already taken.
    #[error("Duplicate function declaration '{name}'")]
    DuplicateFunction {
        /// The function name.
        name: String,
    },
    /// A parameter name repeated within one function declaration.
    #[error("Duplicate parameter name '{name}'")]
    DuplicateParameter {
        /// The repeated parameter name.
        name: String,
    },
    /// Call to a function that was never declared.
    #[error("Unknown function '{name}'")]
    UnknownFunction {
        /// The called name.
        name: String,
    },
    /// Call with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        /// The called function.
        name:     String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found:    usize,
    },
    /// An operation applied to operands of unsupported types.
    #[error("Type mismatch: {details}")]
    TypeMismatch {
        /// What was attempted and what was found.
        details: String,
    },
    /// Division or remainder with a zero divisor, or a cotangent of an
    /// angle whose tangent is exactly zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// A matrix element that is not a plain numeric scalar.
    #[error("Matrix elements must be numeric scalars")]
    InvalidMatrixElement,
    /// Inversion of a matrix whose determinant is exactly zero.
    #[error("Matrix is not invertible (determinant is zero)")]
    NotInvertible,
    /// Inversion of a matrix that is not 2x2.
    #[error("Matrix inversion supports only 2x2 matrices, got {rows}x{cols}")]
    UnsupportedDimension {
        /// Row count of the operand.
        rows: usize,
        /// Column count of the operand.
        cols: usize,
    },
    /// Increment/decrement of a binding that is not numeric.
    #[error("Cannot increment or decrement non-numeric variable '{name}'")]
    NonNumericIncrement {
        /// The stepped variable.
        name: String,
    },
    /// A cast that cannot be performed on the given value.
    #[error("Cannot cast {value} to {target}")]
    InvalidCast {
        /// Textual form of the value being cast.
        value:  String,
        /// The requested target type.
        target: String,
    },
    /// An expression position required a value but the operand produced
    /// none (a call to a function that returns nothing).
    #[error("Expression produced no value")]
    ValuelessExpression,
    /// A `return` executed outside of any function call.
    #[error("'return' used outside of a function body")]
    ReturnOutsideFunction,
    /// The configured call-depth guard tripped.
    #[error("Call depth limit of {limit} exceeded")]
    CallDepthExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// An internal invariant was violated; not reachable from well-formed
    /// syntax trees.
    #[error("{message}")]
    Internal {
        /// Description of the broken invariant.
        message: String,
    },
}

impl RuntimeErrorKind {
    /// An optional hint appended to the rendered diagnostic.
    ///
    /// Only the fault kinds where a concrete user action exists carry a
    /// suggestion; the rest render without one.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UndefinedVariable { .. } => Some("declare the variable before reading it"),
            Self::UndeclaredAssignment { .. } => Some("declare the variable before assigning to it"),
            Self::DuplicateDeclaration { .. } => Some("use reassignment instead of redeclaration"),
            Self::ParameterRedeclaration { .. } => {
                Some("parameters cannot be redeclared in the same function scope")
            },
            Self::AmbiguousShadowedDeclaration { .. } => {
                Some("remove the local declaration first or use a different name")
            },
            Self::ScopeDepthExceeded { .. } => {
                Some("too many parent references for the current nesting depth")
            },
            Self::DuplicateFunction { .. } => Some("function names must be unique"),
            Self::DuplicateParameter { .. } => {
                Some("parameter names must be unique within a function")
            },
            _ => None,
        }
    }
}

/// The source location a fault points at, plus the literal source line
/// retrieved from the front end's source-text service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    /// 1-based source line.
    pub line:        usize,
    /// 0-based source column; the caret is drawn under it.
    pub column:      usize,
    /// The literal text of the offending line, when available.
    pub source_line: Option<String>,
}

/// A structured runtime fault.
///
/// User-facing faults carry a [`SourceContext`]; internal faults (family
/// of truly unreachable states) carry only the kind. Rendering emits the
/// message, the line number, the source line, a caret under the column,
/// and the suggestion, each on its own line.
///
/// ## Example
/// ```
/// use kestrel::error::{RuntimeError, RuntimeErrorKind};
///
/// let fault = RuntimeError::with_context(
///     RuntimeErrorKind::UndefinedVariable { name: "x".to_string() },
///     3,
///     8,
///     Some("set y = x + 1".to_string()),
/// );
///
/// let rendered = fault.to_string();
/// assert!(rendered.starts_with("runtime error: Undefined variable 'x'"));
/// assert!(rendered.contains("at line 3"));
/// assert!(rendered.contains('^'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    /// The fault kind.
    pub kind:    RuntimeErrorKind,
    /// Position and source-line context; `None` for internal faults.
    pub context: Option<SourceContext>,
}

impl RuntimeError {
    /// A fault with full position context.
    #[must_use]
    pub const fn with_context(kind: RuntimeErrorKind,
                              line: usize,
                              column: usize,
                              source_line: Option<String>)
                              -> Self {
        Self { kind,
               context: Some(SourceContext { line,
                                             column,
                                             source_line }), }
    }

    /// A context-free fault, used for internal invariant violations.
    #[must_use]
    pub const fn bare(kind: RuntimeErrorKind) -> Self {
        Self { kind, context: None }
    }

    /// Shorthand for an [`RuntimeErrorKind::Internal`] fault.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::bare(RuntimeErrorKind::Internal { message: message.into(), })
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "runtime error: {}", self.kind)?;

        if let Some(context) = &self.context {
            write!(f, "\n  at line {}", context.line)?;

            if let Some(text) = &context.source_line {
                write!(f, "\n  | {text}")?;
                write!(f, "\n  | {}^", " ".repeat(context.column))?;
            }

            if let Some(suggestion) = self.kind.suggestion() {
                write!(f, "\n  suggestion: {suggestion}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for RuntimeError {}
