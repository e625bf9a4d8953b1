use crate::{
    ast::{Expr, LogicOperator, MatrixOperator, Pos, TypeName},
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{core::Value, matrix::Matrix},
    },
};

impl<'p> Evaluator<'p> {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation; it
    /// dispatches on the expression variant. The result is `None` only
    /// for a call to a function that produced no value; every other
    /// expression yields.
    pub fn eval(&mut self, expr: &'p Expr) -> EvalResult<Option<Value>> {
        match expr {
            Expr::Literal { value, .. } => Ok(Some(Value::from(value))),
            Expr::Identifier { name, pos } => {
                let value = self.current.lookup(name).ok_or_else(|| {
                    self.fault(RuntimeErrorKind::UndefinedVariable { name: name.clone(), }, *pos)
                })?;
                Ok(Some(value))
            },
            Expr::ScopedIdentifier { levels, name, pos } => {
                Ok(Some(self.eval_scoped_identifier(*levels, name, *pos)?))
            },
            Expr::Unary { op, expr, pos } => {
                let value = self.eval_value(expr)?;
                Ok(Some(self.eval_unary_value(*op, &value, *pos)?))
            },
            Expr::Binary { left, op, right, pos } => {
                let lval = self.eval_value(left)?;
                let rval = self.eval_value(right)?;
                Ok(Some(self.eval_binary_values(*op, &lval, &rval, *pos)?))
            },
            Expr::Logic { op, operands, .. } => Ok(Some(self.eval_logic(*op, operands)?)),
            Expr::Not { expr, .. } => {
                let value = self.eval_value(expr)?;
                Ok(Some(Value::Boolean(!value.truthy())))
            },
            Expr::FunctionCall { name, args, pos } => self.call_function(name, args, *pos),
            Expr::BuiltinCall { func, args, pos } => {
                Ok(Some(self.eval_builtin(*func, args, *pos)?))
            },
            Expr::MatrixLiteral { rows, pos } => {
                Ok(Some(self.eval_matrix_literal(rows, *pos)?))
            },
            Expr::MatrixOp { op, expr, pos } => Ok(Some(self.eval_matrix_op(*op, expr, *pos)?)),
            Expr::Cast { target, expr, pos } => Ok(Some(self.eval_cast(*target, expr, *pos)?)),
        }
    }

    /// Evaluates a subexpression that must produce a value.
    ///
    /// Expression positions embedded in arithmetic, conditions, argument
    /// lists, and similar contexts need an actual value; a call that
    /// yields nothing faults with `ValuelessExpression` here.
    pub fn eval_value(&mut self, expr: &'p Expr) -> EvalResult<Value> {
        let pos = expr.pos();
        self.eval(expr)?
            .ok_or_else(|| self.fault(RuntimeErrorKind::ValuelessExpression, pos))
    }

    /// Resolves an explicit-parent reference.
    ///
    /// Walks up exactly `levels` parents, then looks the name up from
    /// that scope outward, bypassing any shadowing by nearer
    /// declarations.
    fn eval_scoped_identifier(&mut self,
                              levels: usize,
                              name: &str,
                              pos: Pos)
                              -> EvalResult<Value> {
        let scope = self.current
                        .ancestor(levels, name)
                        .map_err(|kind| self.fault(kind, pos))?;
        scope.lookup(name).ok_or_else(|| {
            self.fault(RuntimeErrorKind::UndefinedVariable { name: name.to_string(), }, pos)
        })
    }

    /// Evaluates a short-circuit boolean connective over its operands.
    ///
    /// `or` yields true at the first truthy operand and false only after
    /// all operands are falsy; `and` yields false at the first falsy
    /// operand and true only after all are truthy. Operands past the
    /// deciding one are never evaluated.
    fn eval_logic(&mut self, op: LogicOperator, operands: &'p [Expr]) -> EvalResult<Value> {
        for operand in operands {
            let truthy = self.eval_value(operand)?.truthy();
            match op {
                LogicOperator::Or if truthy => return Ok(Value::Boolean(true)),
                LogicOperator::And if !truthy => return Ok(Value::Boolean(false)),
                LogicOperator::Or | LogicOperator::And => {},
            }
        }
        Ok(Value::Boolean(matches!(op, LogicOperator::And)))
    }

    /// Evaluates a matrix literal.
    ///
    /// Every cell expression is evaluated in order; cells must be plain
    /// numeric scalars and the rows rectangular, or the construction is
    /// rejected.
    fn eval_matrix_literal(&mut self, rows: &'p [Vec<Expr>], pos: Pos) -> EvalResult<Value> {
        let mut cells = Vec::with_capacity(rows.len());
        for row in rows {
            let mut values = Vec::with_capacity(row.len());
            for cell in row {
                values.push(self.eval_value(cell)?);
            }
            cells.push(values);
        }

        Matrix::from_rows(cells).map(Value::from)
                                .map_err(|kind| self.fault(kind, pos))
    }

    /// Evaluates a matrix postfix operator (transpose or invert).
    fn eval_matrix_op(&mut self,
                      op: MatrixOperator,
                      expr: &'p Expr,
                      pos: Pos)
                      -> EvalResult<Value> {
        let value = self.eval_value(expr)?;
        let Value::Matrix(matrix) = value else {
            let kind = RuntimeErrorKind::TypeMismatch { details: format!("matrix operation on a {} operand",
                                                                         value.kind_name()), };
            return Err(self.fault(kind, pos));
        };

        match op {
            MatrixOperator::Transpose => Ok(Value::from(matrix.transpose())),
            MatrixOperator::Invert => matrix.invert()
                                            .map(Value::from)
                                            .map_err(|kind| self.fault(kind, pos)),
        }
    }

    /// Evaluates an explicit cast expression through the shared casting
    /// routine.
    fn eval_cast(&mut self, target: TypeName, expr: &'p Expr, pos: Pos) -> EvalResult<Value> {
        let value = self.eval_value(expr)?;
        value.cast(target).map_err(|kind| self.fault(kind, pos))
    }
}
