use crate::{
    ast::{BinaryOperator, Pos},
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates an arithmetic operator.
    ///
    /// `+` concatenates as soon as either operand is a string; all other
    /// combinations require numeric operands. Integer pairs stay in
    /// integer arithmetic; any float operand promotes the operation to
    /// floats. Division picks truncating integer division exactly when
    /// the right operand is an integer and the left is not a float.
    pub(crate) fn eval_arithmetic(&self,
                                  op: BinaryOperator,
                                  left: &Value,
                                  right: &Value,
                                  pos: Pos)
                                  -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => self.eval_add(left, right, pos),
            BinaryOperator::Sub | BinaryOperator::Mul => self.eval_mul_sub(op, left, right, pos),
            BinaryOperator::Div => self.eval_div(left, right, pos),
            BinaryOperator::Mod => self.eval_mod(left, right, pos),
            _ => Err(crate::error::RuntimeError::internal(format!("operator '{op}' dispatched to the arithmetic family"))),
        }
    }

    /// `+`: string concatenation when either side is a string, numeric
    /// addition otherwise.
    fn eval_add(&self, left: &Value, right: &Value, pos: Pos) -> EvalResult<Value> {
        match (left, right) {
            (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!("{left}{right}"))),
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
            _ => {
                let (a, b) = self.numeric_pair(BinaryOperator::Add, left, right, pos)?;
                Ok(Value::Float(a + b))
            },
        }
    }

    /// `-` and `*`: numeric only, type-preserving on integer pairs.
    fn eval_mul_sub(&self,
                    op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    pos: Pos)
                    -> EvalResult<Value> {
        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            return Ok(Value::Integer(match op {
                                         BinaryOperator::Sub => a - b,
                                         _ => a * b,
                                     }));
        }

        let (a, b) = self.numeric_pair(op, left, right, pos)?;
        Ok(Value::Float(match op {
                            BinaryOperator::Sub => a - b,
                            _ => a * b,
                        }))
    }

    /// `/`: truncating integer division for an integer pair, real
    /// division otherwise. A zero divisor faults in both regimes.
    fn eval_div(&self, left: &Value, right: &Value, pos: Pos) -> EvalResult<Value> {
        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            if *b == 0 {
                return Err(self.fault(RuntimeErrorKind::DivisionByZero, pos));
            }
            return Ok(Value::Integer(a / b));
        }

        let (a, b) = self.numeric_pair(BinaryOperator::Div, left, right, pos)?;
        if b == 0.0 {
            return Err(self.fault(RuntimeErrorKind::DivisionByZero, pos));
        }
        Ok(Value::Float(a / b))
    }

    /// `%`: remainder, with the same zero-divisor rule as division.
    fn eval_mod(&self, left: &Value, right: &Value, pos: Pos) -> EvalResult<Value> {
        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            if *b == 0 {
                return Err(self.fault(RuntimeErrorKind::DivisionByZero, pos));
            }
            return Ok(Value::Integer(a % b));
        }

        let (a, b) = self.numeric_pair(BinaryOperator::Mod, left, right, pos)?;
        if b == 0.0 {
            return Err(self.fault(RuntimeErrorKind::DivisionByZero, pos));
        }
        Ok(Value::Float(a % b))
    }

    /// Converts both operands to floats, or faults naming the operator
    /// and the offending operand kinds.
    pub(crate) fn numeric_pair(&self,
                               op: BinaryOperator,
                               left: &Value,
                               right: &Value,
                               pos: Pos)
                               -> EvalResult<(f64, f64)> {
        match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => {
                let kind = RuntimeErrorKind::TypeMismatch { details: format!("unsupported operand types for '{op}': {} and {}",
                                                                             left.kind_name(),
                                                                             right.kind_name()), };
                Err(self.fault(kind, pos))
            },
        }
    }
}
