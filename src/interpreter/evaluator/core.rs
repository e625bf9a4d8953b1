use rustc_hash::FxHashMap;

use crate::{
    ast::{AssignTarget, BinaryOperator, Expr, Pos, Program, Statement, StepOperator, TypeName},
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        output::OutputSink,
        scope::ScopeRef,
        source::SourceText,
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All execution functions return either a value of type `T` or a
/// [`RuntimeError`] describing the fault.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The control-flow signal threaded through statement execution.
///
/// Every statement yields exactly one of these. Executors inspect and
/// relay the tag: only loops consume [`Flow::Break`], and only the
/// function-call boundary consumes [`Flow::Return`]. Everything else
/// passes signals through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Ordinary completion, with the value the statement yielded (if any).
    Normal(Option<Value>),
    /// A `break` sentinel travelling to the nearest enclosing loop.
    Break,
    /// A `return` unwind carrying its value to the function-call boundary.
    Return(Value),
}

/// How a statement block obtains its scope.
///
/// A function call creates the invocation scope itself and passes
/// `Ambient` so the body does not push a second scope on top of it. The
/// parameter is one-shot by construction: it applies to exactly the block
/// execution it is passed to and cannot leak into later blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMode {
    /// Push a fresh child scope for the block and pop it on exit.
    Fresh,
    /// Execute in the current scope; the caller already created one.
    Ambient,
}

/// Whether a declaration enforces the usual redeclaration checks.
///
/// The initializer/updater position of a `for` loop waives them: those
/// declarations are evaluated as plain assignments into the loop's
/// enclosing scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Redeclaration {
    Checked,
    Waived,
}

/// Tunables for a single evaluation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalConfig {
    /// Optional hardening guard on call-stack depth. `None` (the
    /// default) leaves recursion unbounded, matching the language
    /// semantics; setting a limit turns runaway recursion into a
    /// [`RuntimeErrorKind::CallDepthExceeded`] fault.
    pub call_depth_limit: Option<usize>,
    /// Where display statements emit their lines as they execute.
    pub sink:             OutputSink,
}

/// One entry of the call stack.
///
/// Frames are bookkeeping only: pushed on call, popped on return or
/// fault, never consulted for name resolution (that is what the scope
/// chain is for).
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// The called function.
    pub name:   String,
    /// Its parameter names.
    pub params: Vec<String>,
    /// The scope created for the invocation.
    pub scope:  ScopeRef,
}

/// A declared user function.
///
/// The body is borrowed from the syntax tree; the defining scope is the
/// scope that was active at the point of declaration, captured by shared
/// reference so closures keep their environment alive.
#[derive(Debug, Clone)]
pub struct Function<'p> {
    /// The function name.
    pub name:           String,
    /// Ordered parameter names, unique within the function.
    pub params:         Vec<String>,
    /// The body statement block, owned by the tree.
    pub body:           &'p [Statement],
    /// The scope active when the function was declared.
    pub defining_scope: ScopeRef,
}

/// Stores the runtime evaluation state.
///
/// The evaluator owns the scope chain, the function registry, the call
/// stack, and the append-only output log. It is created once per program
/// run; [`Evaluator::run`] drives the top-level statements in order.
///
/// ## Usage
/// ```
/// use kestrel::{
///     ast::{Expr, LiteralValue, Pos, Program, Statement},
///     interpreter::{
///         evaluator::core::Evaluator,
///         output::OutputSink,
///         source::SourceText,
///     },
/// };
///
/// // display 42
/// let program =
///     Program::new(vec![Statement::Display { values: vec![Expr::Literal { value: 42.into(),
///                                                                         pos:   Pos::new(1, 8), }],
///                                            pos:    Pos::new(1, 0), }]);
///
/// let mut evaluator = Evaluator::new(SourceText::new("display 42")).with_sink(OutputSink::Silent);
/// evaluator.run(&program).unwrap();
///
/// assert_eq!(evaluator.output(), ["42"]);
/// ```
pub struct Evaluator<'p> {
    /// The root scope; never discarded while the program runs.
    globals:              ScopeRef,
    /// The scope execution currently resolves names against.
    pub(crate) current:   ScopeRef,
    /// Registry of declared functions, keyed by their unique names.
    pub(crate) functions: FxHashMap<String, Function<'p>>,
    /// Bookkeeping stack of active invocations.
    pub(crate) call_stack: Vec<CallFrame>,
    /// The accumulated output log.
    output:               Vec<String>,
    /// Source-line service for diagnostics.
    source:               SourceText,
    /// Run configuration.
    pub(crate) config:    EvalConfig,
}

impl<'p> Evaluator<'p> {
    /// Creates an evaluator with an empty global scope and the default
    /// configuration (stdout sink, unlimited call depth).
    #[must_use]
    pub fn new(source: SourceText) -> Self {
        let globals = ScopeRef::root();
        Self { current: globals.clone(),
               globals,
               functions: FxHashMap::default(),
               call_stack: Vec::new(),
               output: Vec::new(),
               source,
               config: EvalConfig::default(), }
    }

    /// Replaces the run configuration.
    #[must_use]
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Redirects display emission, keeping the rest of the configuration.
    #[must_use]
    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.config.sink = sink;
        self
    }

    /// Seeds an initial binding in the global scope before the run.
    pub fn define_global(&mut self, name: &str, value: Value) {
        self.globals.declare(name, value, false);
    }

    /// The output log accumulated so far.
    ///
    /// Lines appended before a fault are never discarded; after a failed
    /// run this still returns everything produced up to the fault.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Consumes the evaluator and takes ownership of the output log.
    #[must_use]
    pub fn into_output(self) -> Vec<String> {
        self.output
    }

    /// Executes every top-level statement in order.
    ///
    /// Any statement that yields a non-none, non-break result has its
    /// stringified value appended to the output log; a bare function call
    /// with a non-none result first appends a `Result: <value>` line.
    /// Evaluation stops at the first fault, which is propagated.
    ///
    /// # Errors
    /// The first unrecovered [`RuntimeError`] raised by any statement.
    pub fn run(&mut self, program: &'p Program) -> EvalResult<()> {
        for statement in &program.statements {
            match self.exec_statement(statement)? {
                Flow::Normal(Some(value)) => {
                    if matches!(statement, Statement::Call { .. }) {
                        self.output.push(format!("Result: {value}"));
                    }
                    self.output.push(value.to_string());
                },
                Flow::Normal(None) | Flow::Break => {},
                Flow::Return(_) => {
                    return Err(RuntimeError::internal("return signal escaped to the top level"));
                },
            }
        }
        Ok(())
    }

    /// Builds a positioned fault, quoting the source line when the
    /// source-text service has it.
    pub(crate) fn fault(&self, kind: RuntimeErrorKind, pos: Pos) -> RuntimeError {
        RuntimeError::with_context(kind,
                                   pos.line,
                                   pos.column,
                                   self.source.line_text(pos.line).map(str::to_string))
    }

    /// Appends one finished display line to the log and emits it to the
    /// live sink. Both effects are required; neither replaces the other.
    pub(crate) fn push_display_line(&mut self, line: String) {
        self.config.sink.emit(&line);
        self.output.push(line);
    }

    /// Executes a single statement and returns its control-flow signal.
    ///
    /// This is the central dispatch over the closed statement variant
    /// set; each arm delegates to the matching executor.
    pub fn exec_statement(&mut self, statement: &'p Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Declare { target,
                                 declared_type,
                                 value,
                                 pos, } => {
                self.exec_declare(target, *declared_type, value, *pos, Redeclaration::Checked)
            },
            Statement::Assign { target,
                                declared_type,
                                value,
                                pos, } => self.exec_assign(target, *declared_type, value, *pos),
            Statement::CompoundAssign { name, op, value, pos } => {
                self.exec_compound_assign(name, *op, value, *pos)
            },
            Statement::FunctionDecl { name, params, body, pos } => {
                self.exec_function_decl(name, params, body, *pos)
            },
            Statement::Call { name, args, pos } => {
                let result = self.call_function(name, args, *pos)?;
                Ok(Flow::Normal(result))
            },
            Statement::Return { value, pos } => {
                if self.call_stack.is_empty() {
                    return Err(self.fault(RuntimeErrorKind::ReturnOutsideFunction, *pos));
                }
                let value = self.eval_value(value)?;
                Ok(Flow::Return(value))
            },
            Statement::Display { values, .. } => self.exec_display(values),
            Statement::If { arms, else_body, .. } => self.exec_if(arms, else_body.as_deref()),
            Statement::While { condition, body, .. } => self.exec_while(condition, body),
            Statement::For { init,
                             condition,
                             update,
                             body,
                             .. } => {
                self.exec_for(init.as_deref(), condition, update.as_deref(), body)
            },
            Statement::Block { statements, .. } => self.exec_block(statements, ScopeMode::Fresh),
            Statement::Break { .. } => Ok(Flow::Break),
            Statement::Step { name, op, pos } => self.exec_step(name, *op, *pos),
        }
    }

    /// Executes a declaration.
    ///
    /// Plain declarations bind in the current scope after the
    /// redeclaration checks (waived in for-loop header position);
    /// explicit-parent declarations resolve their target scope first and
    /// are rejected while a nearer scope still shadows the name. A typed
    /// declaration casts the value; an untyped one narrows
    /// integral floats (see [`Value::narrowed_for_untyped_store`]).
    pub(crate) fn exec_declare(&mut self,
                               target: &AssignTarget,
                               declared_type: Option<TypeName>,
                               value: &'p Expr,
                               pos: Pos,
                               redeclaration: Redeclaration)
                               -> EvalResult<Flow> {
        let value = self.eval_value(value)?;
        let value = self.apply_annotation(value, declared_type, pos)?;

        if target.levels == 0 {
            if redeclaration == Redeclaration::Checked {
                if self.current.is_parameter(&target.name) {
                    let kind = RuntimeErrorKind::ParameterRedeclaration { name:
                                                                              target.name.clone(), };
                    return Err(self.fault(kind, pos));
                }
                if self.current.has_local(&target.name) {
                    let kind = RuntimeErrorKind::DuplicateDeclaration { name:
                                                                            target.name.clone(), };
                    return Err(self.fault(kind, pos));
                }
            }
            self.current.declare(&target.name, value, false);
        } else {
            let scope = self.current
                            .ancestor(target.levels, &target.name)
                            .map_err(|kind| self.fault(kind, pos))?;
            if self.current.shadows_before(&scope, &target.name) {
                let kind = RuntimeErrorKind::AmbiguousShadowedDeclaration { name:
                                                                                target.name
                                                                                      .clone(), };
                return Err(self.fault(kind, pos));
            }
            scope.declare(&target.name, value, false);
        }

        Ok(Flow::Normal(None))
    }

    /// Executes a reassignment.
    ///
    /// A plain target mutates the nearest scope already containing the
    /// name; an explicit-parent target writes into the resolved ancestor
    /// scope directly, bypassing any shadowing.
    pub(crate) fn exec_assign(&mut self,
                              target: &AssignTarget,
                              declared_type: Option<TypeName>,
                              value: &'p Expr,
                              pos: Pos)
                              -> EvalResult<Flow> {
        let value = self.eval_value(value)?;
        let value = self.apply_annotation(value, declared_type, pos)?;

        if target.levels == 0 {
            self.current
                .reassign(&target.name, value)
                .map_err(|kind| self.fault(kind, pos))?;
        } else {
            let scope = self.current
                            .ancestor(target.levels, &target.name)
                            .map_err(|kind| self.fault(kind, pos))?;
            scope.declare(&target.name, value, false);
        }

        Ok(Flow::Normal(None))
    }

    /// Executes a compound assignment (`+=`, `-=`, `*=`, `/=`).
    ///
    /// Applies the operator to the current value of the nearest existing
    /// binding, stores the result there, and yields the new value.
    pub(crate) fn exec_compound_assign(&mut self,
                                       name: &str,
                                       op: BinaryOperator,
                                       value: &'p Expr,
                                       pos: Pos)
                                       -> EvalResult<Flow> {
        let Some(current_value) = self.current.lookup(name) else {
            let kind = RuntimeErrorKind::UndeclaredAssignment { name: name.to_string(), };
            return Err(self.fault(kind, pos));
        };

        let rhs = self.eval_value(value)?;
        let result = self.eval_binary_values(op, &current_value, &rhs, pos)?;

        self.current
            .reassign(name, result.clone())
            .map_err(|kind| self.fault(kind, pos))?;

        Ok(Flow::Normal(Some(result)))
    }

    /// Executes a display statement: stringifies the operands, joins them
    /// with single spaces, and appends the line to the log and the sink.
    pub(crate) fn exec_display(&mut self, values: &'p [Expr]) -> EvalResult<Flow> {
        let mut parts = Vec::with_capacity(values.len());
        for value in values {
            parts.push(self.eval_value(value)?.to_string());
        }

        self.push_display_line(parts.join(" "));
        Ok(Flow::Normal(None))
    }

    /// Executes a bare increment/decrement.
    ///
    /// The target must already be bound and numeric; the binding is
    /// mutated in place and the new value yielded.
    pub(crate) fn exec_step(&mut self,
                            name: &str,
                            op: StepOperator,
                            pos: Pos)
                            -> EvalResult<Flow> {
        let Some(current_value) = self.current.lookup(name) else {
            let kind = RuntimeErrorKind::UndefinedVariable { name: name.to_string(), };
            return Err(self.fault(kind, pos));
        };

        let stepped = match (current_value, op) {
            (Value::Integer(n), StepOperator::Increment) => Value::Integer(n + 1),
            (Value::Integer(n), StepOperator::Decrement) => Value::Integer(n - 1),
            (Value::Float(r), StepOperator::Increment) => Value::Float(r + 1.0),
            (Value::Float(r), StepOperator::Decrement) => Value::Float(r - 1.0),
            _ => {
                let kind = RuntimeErrorKind::NonNumericIncrement { name: name.to_string(), };
                return Err(self.fault(kind, pos));
            },
        };

        self.current
            .reassign(name, stepped.clone())
            .map_err(|kind| self.fault(kind, pos))?;

        Ok(Flow::Normal(Some(stepped)))
    }

    /// Casts a stored value to its declared type, or narrows integral
    /// floats when the binding is untyped.
    fn apply_annotation(&self,
                        value: Value,
                        declared_type: Option<TypeName>,
                        pos: Pos)
                        -> EvalResult<Value> {
        match declared_type {
            Some(target) => value.cast(target).map_err(|kind| self.fault(kind, pos)),
            None => Ok(value.narrowed_for_untyped_store()),
        }
    }
}
