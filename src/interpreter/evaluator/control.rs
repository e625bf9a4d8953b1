use crate::{
    ast::{Expr, IfArm, Statement},
    interpreter::evaluator::core::{EvalResult, Evaluator, Flow, Redeclaration, ScopeMode},
};

/// Outcome of one loop-body pass.
enum Iteration {
    /// The body ran to completion; keep looping.
    Finished,
    /// The body produced a signal that ends the loop; the wrapped flow is
    /// what the loop statement itself yields.
    Stop(Flow),
}

impl<'p> Evaluator<'p> {
    /// Evaluates an expression as a condition, coercing by truthiness.
    pub(crate) fn eval_condition(&mut self, condition: &'p Expr) -> EvalResult<bool> {
        Ok(self.eval_value(condition)?.truthy())
    }

    /// Executes a statement block.
    ///
    /// With [`ScopeMode::Fresh`] a child scope is pushed first and popped
    /// on every exit path, fault included. With [`ScopeMode::Ambient`]
    /// the block runs in the scope the caller prepared (the function-call
    /// mechanism uses this so a body does not get a second scope on top
    /// of its invocation scope) and yields whatever its last executed
    /// statement yielded; a fresh-scoped block yields none.
    ///
    /// `Break` and `Return` signals are relayed outward unchanged.
    pub(crate) fn exec_block(&mut self,
                             statements: &'p [Statement],
                             mode: ScopeMode)
                             -> EvalResult<Flow> {
        let saved = self.current.clone();
        if mode == ScopeMode::Fresh {
            self.current = self.current.child();
        }

        let result = self.exec_sequence(statements, mode);

        self.current = saved;
        result
    }

    /// Runs the statements of a block in order, relaying any signal.
    fn exec_sequence(&mut self, statements: &'p [Statement], mode: ScopeMode) -> EvalResult<Flow> {
        let mut last = None;

        for statement in statements {
            match self.exec_statement(statement)? {
                Flow::Normal(value) => last = value,
                signal => return Ok(signal),
            }
        }

        Ok(match mode {
               ScopeMode::Ambient => Flow::Normal(last),
               ScopeMode::Fresh => Flow::Normal(None),
           })
    }

    /// Executes an `if` / `else if` / `else` statement.
    ///
    /// Conditions are evaluated strictly in source order and only the
    /// first true branch runs. The executed body's signal, including a
    /// break sentinel or a propagating return, is passed through
    /// unchanged: branches relay, they never consume.
    pub(crate) fn exec_if(&mut self,
                          arms: &'p [IfArm],
                          else_body: Option<&'p Statement>)
                          -> EvalResult<Flow> {
        for arm in arms {
            if self.eval_condition(&arm.condition)? {
                return self.exec_statement(&arm.body);
            }
        }

        match else_body {
            Some(body) => self.exec_statement(body),
            None => Ok(Flow::Normal(None)),
        }
    }

    /// Executes a `while` loop.
    ///
    /// The condition is re-evaluated before each iteration; every
    /// iteration runs in its own fresh scope, popped on each exit from
    /// the iteration. A `break` from the body stops the loop and is fully
    /// consumed here; a non-none result from any body statement stops the
    /// loop and becomes its result; a `return` propagates past it.
    pub(crate) fn exec_while(&mut self,
                             condition: &'p Expr,
                             body: &'p [Statement])
                             -> EvalResult<Flow> {
        loop {
            if !self.eval_condition(condition)? {
                return Ok(Flow::Normal(None));
            }

            let saved = self.current.clone();
            self.current = self.current.child();
            let outcome = self.exec_iteration(body, true);
            self.current = saved;

            if let Iteration::Stop(flow) = outcome? {
                return Ok(flow);
            }
        }
    }

    /// Executes a three-part `for` loop.
    ///
    /// The initializer runs once in the loop's enclosing scope, with
    /// redeclaration checks waived. Each iteration gets a fresh body
    /// scope; the update statement runs back in the enclosing scope
    /// (outside the just-popped body scope, so names declared in the body
    /// are never visible to it) and only while the condition still
    /// holds. `break` stops the loop; `return` propagates.
    pub(crate) fn exec_for(&mut self,
                           init: Option<&'p Statement>,
                           condition: &'p Expr,
                           update: Option<&'p Statement>,
                           body: &'p [Statement])
                           -> EvalResult<Flow> {
        if let Some(statement) = init {
            self.exec_header_statement(statement)?;
        }

        loop {
            if !self.eval_condition(condition)? {
                return Ok(Flow::Normal(None));
            }

            let saved = self.current.clone();
            self.current = self.current.child();
            let outcome = self.exec_iteration(body, false);
            self.current = saved;

            if let Iteration::Stop(flow) = outcome? {
                return Ok(flow);
            }

            if self.eval_condition(condition)? {
                if let Some(statement) = update {
                    self.exec_header_statement(statement)?;
                }
            }
        }
    }

    /// Runs one pass over a loop body.
    ///
    /// `value_stops` selects the while-loop rule where the first non-none
    /// statement result ends the loop; for-loops ignore body values.
    fn exec_iteration(&mut self,
                      body: &'p [Statement],
                      value_stops: bool)
                      -> EvalResult<Iteration> {
        for statement in body {
            match self.exec_statement(statement)? {
                Flow::Break => return Ok(Iteration::Stop(Flow::Normal(None))),
                Flow::Return(value) => return Ok(Iteration::Stop(Flow::Return(value))),
                Flow::Normal(Some(value)) if value_stops => {
                    return Ok(Iteration::Stop(Flow::Normal(Some(value))));
                },
                Flow::Normal(_) => {},
            }
        }
        Ok(Iteration::Finished)
    }

    /// Executes a statement in for-loop header position, where a
    /// declaration is treated as a plain assignment (redeclaration checks
    /// waived).
    fn exec_header_statement(&mut self, statement: &'p Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Declare { target,
                                 declared_type,
                                 value,
                                 pos, } => {
                self.exec_declare(target, *declared_type, value, *pos, Redeclaration::Waived)
            },
            other => self.exec_statement(other),
        }
    }
}
