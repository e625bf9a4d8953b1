use crate::{
    ast::{BinaryOperator, Pos},
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

/// Equality across the value model.
///
/// Numeric values compare by value, so `1 == 1.0`. Strings, booleans,
/// and matrices compare structurally against their own kind; matrices
/// compare rows and cells, never identity. Operands of unrelated kinds
/// are simply unequal: `1 == "x"` is false, not a fault.
#[allow(clippy::cast_precision_loss)]
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
            *a as f64 == *b
        },
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Matrix(a), Value::Matrix(b)) => a == b,
        _ => false,
    }
}

impl Evaluator<'_> {
    /// Evaluates a comparison operator.
    ///
    /// `==` and `!=` are defined for every value kind (deep structural
    /// equality for strings and matrices); the ordering operators require
    /// numeric operands on both sides.
    pub(crate) fn eval_comparison(&self,
                                  op: BinaryOperator,
                                  left: &Value,
                                  right: &Value,
                                  pos: Pos)
                                  -> EvalResult<Value> {
        match op {
            BinaryOperator::Equal => Ok(Value::Boolean(values_equal(left, right))),
            BinaryOperator::NotEqual => Ok(Value::Boolean(!values_equal(left, right))),
            _ => self.eval_ordering(op, left, right, pos),
        }
    }

    /// Evaluates `<`, `>`, `<=`, `>=` over numeric operands.
    fn eval_ordering(&self,
                     op: BinaryOperator,
                     left: &Value,
                     right: &Value,
                     pos: Pos)
                     -> EvalResult<Value> {
        let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
            let kind = RuntimeErrorKind::TypeMismatch { details: format!("comparison '{op}' on {} and {}",
                                                                         left.kind_name(),
                                                                         right.kind_name()), };
            return Err(self.fault(kind, pos));
        };

        let result = match op {
            BinaryOperator::Less => a < b,
            BinaryOperator::Greater => a > b,
            BinaryOperator::LessEqual => a <= b,
            BinaryOperator::GreaterEqual => a >= b,
            _ => {
                return Err(crate::error::RuntimeError::internal(format!("operator '{op}' dispatched to the ordering family")));
            },
        };

        Ok(Value::Boolean(result))
    }
}
