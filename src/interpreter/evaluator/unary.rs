use crate::{
    ast::{Pos, UnaryOperator},
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Applies a unary operator to an evaluated operand.
    ///
    /// Both operators require a numeric operand: unary plus returns it
    /// unchanged, negation flips its sign and preserves the numeric kind.
    pub(crate) fn eval_unary_value(&self,
                                   op: UnaryOperator,
                                   value: &Value,
                                   pos: Pos)
                                   -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Plus, Value::Integer(n)) => Ok(Value::Integer(*n)),
            (UnaryOperator::Plus, Value::Float(r)) => Ok(Value::Float(*r)),
            (UnaryOperator::Negate, Value::Integer(n)) => Ok(Value::Integer(-n)),
            (UnaryOperator::Negate, Value::Float(r)) => Ok(Value::Float(-r)),
            (_, other) => {
                let sign = match op {
                    UnaryOperator::Plus => "+",
                    UnaryOperator::Negate => "-",
                };
                let kind = RuntimeErrorKind::TypeMismatch { details: format!("unary '{sign}' on a {} operand",
                                                                             other.kind_name()), };
                Err(self.fault(kind, pos))
            },
        }
    }
}
