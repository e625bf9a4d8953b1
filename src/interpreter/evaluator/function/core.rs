use rustc_hash::FxHashSet;

use crate::{
    ast::{Expr, Param, Pos, Statement},
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{CallFrame, EvalResult, Evaluator, Flow, Function, ScopeMode},
        value::core::Value,
    },
};

impl<'p> Evaluator<'p> {
    /// Declares a user-defined function.
    ///
    /// The declaration captures the scope active right now as the
    /// function's defining scope, giving closures over enclosing
    /// bindings. Functions live for the remainder of the run; there is no
    /// deletion.
    pub(crate) fn exec_function_decl(&mut self,
                                     name: &str,
                                     params: &'p [Param],
                                     body: &'p [Statement],
                                     pos: Pos)
                                     -> EvalResult<Flow> {
        if self.functions.contains_key(name) {
            let kind = RuntimeErrorKind::DuplicateFunction { name: name.to_string(), };
            return Err(self.fault(kind, pos));
        }

        let mut seen = FxHashSet::default();
        for param in params {
            if !seen.insert(param.name.as_str()) {
                let kind = RuntimeErrorKind::DuplicateParameter { name: param.name.clone(), };
                return Err(self.fault(kind, param.pos));
            }
        }

        tracing::debug!(function = name, params = params.len(), "declared function");

        self.functions
            .insert(name.to_string(),
                    Function { name:           name.to_string(),
                               params:         params.iter().map(|p| p.name.clone()).collect(),
                               body,
                               defining_scope: self.current.clone(), });

        Ok(Flow::Normal(None))
    }

    /// Calls a user-defined function.
    ///
    /// The invocation scope is a fresh child of the function's *defining*
    /// scope (lexical, not dynamic, capture) with each argument bound
    /// to its parameter and marked as such. The body executes with that
    /// scope as its ambient scope (no extra block scope on top). A caught
    /// return unwind becomes the call's result; otherwise the result is
    /// whatever the last executed body statement yielded. The call frame
    /// is popped and the caller's scope restored on every exit path,
    /// faults included.
    #[tracing::instrument(level = "debug", skip(self, args))]
    pub(crate) fn call_function(&mut self,
                                name: &str,
                                args: &'p [Expr],
                                pos: Pos)
                                -> EvalResult<Option<Value>> {
        let function = self.functions.get(name).cloned().ok_or_else(|| {
            self.fault(RuntimeErrorKind::UnknownFunction { name: name.to_string(), }, pos)
        })?;

        if args.len() != function.params.len() {
            let kind = RuntimeErrorKind::ArityMismatch { name:     name.to_string(),
                                                         expected: function.params.len(),
                                                         found:    args.len(), };
            return Err(self.fault(kind, pos));
        }

        if let Some(limit) = self.config.call_depth_limit {
            if self.call_stack.len() >= limit {
                return Err(self.fault(RuntimeErrorKind::CallDepthExceeded { limit }, pos));
            }
        }

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.eval_value(arg)?);
        }

        let local = function.defining_scope.child();
        for (param, value) in function.params.iter().zip(arg_values) {
            local.declare(param, value, true);
        }

        self.call_stack.push(CallFrame { name:   function.name.clone(),
                                         params: function.params.clone(),
                                         scope:  local.clone(), });
        let saved = std::mem::replace(&mut self.current, local);

        let outcome = self.exec_block(function.body, ScopeMode::Ambient);

        self.current = saved;
        self.call_stack.pop();

        match outcome? {
            Flow::Return(value) => Ok(Some(value)),
            Flow::Normal(value) => Ok(value),
            // A break with no enclosing loop in the body; it cannot cross
            // the call boundary, so the call just yields nothing.
            Flow::Break => Ok(None),
        }
    }
}
