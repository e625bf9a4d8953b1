use crate::{
    ast::{BinaryOperator, Pos},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Applies a binary operator to two evaluated operands.
    ///
    /// Arithmetic operators go to the numeric family (which also handles
    /// string concatenation through `+`); comparison operators go to the
    /// comparison family. The operator set is closed, so dispatch is
    /// exhaustive.
    pub(crate) fn eval_binary_values(&self,
                                     op: BinaryOperator,
                                     left: &Value,
                                     right: &Value,
                                     pos: Pos)
                                     -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => self.eval_arithmetic(op, left, right, pos),
            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                self.eval_comparison(op, left, right, pos)
            },
        }
    }
}
