use crate::{
    ast::{Builtin, Expr, Pos},
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

/// Reciprocal of the tangent.
///
/// Faults when the tangent is exactly zero, where the cotangent is
/// undefined.
fn cotan(x: f64) -> Result<f64, RuntimeErrorKind> {
    let tangent = x.tan();
    if tangent == 0.0 {
        return Err(RuntimeErrorKind::DivisionByZero);
    }
    Ok(1.0 / tangent)
}

impl<'p> Evaluator<'p> {
    /// Evaluates a built-in math function call.
    ///
    /// Built-ins take numeric arguments and always yield floats, `power`
    /// included. The builtin set is closed by the grammar, so dispatch is
    /// an exhaustive match.
    pub(crate) fn eval_builtin(&mut self,
                               func: Builtin,
                               args: &'p [Expr],
                               pos: Pos)
                               -> EvalResult<Value> {
        if args.len() != func.arity() {
            let kind = RuntimeErrorKind::ArityMismatch { name:     func.name().to_string(),
                                                         expected: func.arity(),
                                                         found:    args.len(), };
            return Err(self.fault(kind, pos));
        }

        let mut operands = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.eval_value(arg)?;
            let Some(operand) = value.as_f64() else {
                let kind = RuntimeErrorKind::TypeMismatch { details: format!("'{}' expects numeric arguments, found a {}",
                                                                             func.name(),
                                                                             value.kind_name()), };
                return Err(self.fault(kind, pos));
            };
            operands.push(operand);
        }

        let result = match func {
            Builtin::Power => operands[0].powf(operands[1]),
            Builtin::Sin => operands[0].sin(),
            Builtin::Cos => operands[0].cos(),
            Builtin::Tan => operands[0].tan(),
            Builtin::Cotan => cotan(operands[0]).map_err(|kind| self.fault(kind, pos))?,
        };

        Ok(Value::Float(result))
    }
}
