use kestrel::{
    ast::{
        AssignTarget, BinaryOperator, Builtin, Expr, IfArm, LiteralValue, LogicOperator,
        MatrixOperator, Param, Pos, Program, Statement, StepOperator, TypeName, UnaryOperator,
    },
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::core::{EvalConfig, Evaluator},
        output::OutputSink,
        source::SourceText,
        value::core::Value,
    },
};
use pretty_assertions::assert_eq;

const P: Pos = Pos { line: 1, column: 0 };

fn int(n: i64) -> Expr {
    Expr::Literal { value: n.into(), pos: P }
}

fn flt(r: f64) -> Expr {
    Expr::Literal { value: r.into(), pos: P }
}

fn boolean(v: bool) -> Expr {
    Expr::Literal { value: v.into(), pos: P }
}

fn string(v: &str) -> Expr {
    Expr::Literal { value: LiteralValue::Str(v.to_string()),
                    pos:   P, }
}

fn var(name: &str) -> Expr {
    Expr::Identifier { name: name.to_string(),
                       pos:  P, }
}

fn parent_var(levels: usize, name: &str) -> Expr {
    Expr::ScopedIdentifier { levels,
                             name: name.to_string(),
                             pos: P }
}

fn bin(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::Binary { left: Box::new(left),
                   op,
                   right: Box::new(right),
                   pos: P }
}

fn neg(expr: Expr) -> Expr {
    Expr::Unary { op:   UnaryOperator::Negate,
                  expr: Box::new(expr),
                  pos:  P, }
}

fn logic(op: LogicOperator, operands: Vec<Expr>) -> Expr {
    Expr::Logic { op, operands, pos: P }
}

fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::FunctionCall { name: name.to_string(),
                         args,
                         pos: P }
}

fn builtin(func: Builtin, args: Vec<Expr>) -> Expr {
    Expr::BuiltinCall { func, args, pos: P }
}

fn matrix(rows: Vec<Vec<Expr>>) -> Expr {
    Expr::MatrixLiteral { rows, pos: P }
}

fn transpose(expr: Expr) -> Expr {
    Expr::MatrixOp { op:   MatrixOperator::Transpose,
                     expr: Box::new(expr),
                     pos:  P, }
}

fn invert(expr: Expr) -> Expr {
    Expr::MatrixOp { op:   MatrixOperator::Invert,
                     expr: Box::new(expr),
                     pos:  P, }
}

fn cast(target: TypeName, expr: Expr) -> Expr {
    Expr::Cast { target,
                 expr: Box::new(expr),
                 pos: P }
}

fn set(name: &str, value: Expr) -> Statement {
    Statement::Declare { target:        AssignTarget::plain(name.to_string()),
                         declared_type: None,
                         value,
                         pos:           P, }
}

fn set_typed(name: &str, declared_type: TypeName, value: Expr) -> Statement {
    Statement::Declare { target:        AssignTarget::plain(name.to_string()),
                         declared_type: Some(declared_type),
                         value,
                         pos:           P, }
}

fn set_parent(levels: usize, name: &str, value: Expr) -> Statement {
    Statement::Declare { target:        AssignTarget { levels,
                                                       name: name.to_string(), },
                         declared_type: None,
                         value,
                         pos:           P, }
}

fn assign(name: &str, value: Expr) -> Statement {
    Statement::Assign { target:        AssignTarget::plain(name.to_string()),
                        declared_type: None,
                        value,
                        pos:           P, }
}

fn assign_parent(levels: usize, name: &str, value: Expr) -> Statement {
    Statement::Assign { target:        AssignTarget { levels,
                                                      name: name.to_string(), },
                        declared_type: None,
                        value,
                        pos:           P, }
}

fn compound(name: &str, op: BinaryOperator, value: Expr) -> Statement {
    Statement::CompoundAssign { name: name.to_string(),
                                op,
                                value,
                                pos: P }
}

fn display(values: Vec<Expr>) -> Statement {
    Statement::Display { values, pos: P }
}

fn function(name: &str, params: &[&str], body: Vec<Statement>) -> Statement {
    Statement::FunctionDecl { name:   name.to_string(),
                              params: params.iter()
                                            .map(|p| Param { name: (*p).to_string(),
                                                             pos:  P, })
                                            .collect(),
                              body,
                              pos:    P, }
}

fn call_stmt(name: &str, args: Vec<Expr>) -> Statement {
    Statement::Call { name: name.to_string(),
                      args,
                      pos: P }
}

fn ret(value: Expr) -> Statement {
    Statement::Return { value, pos: P }
}

fn block(statements: Vec<Statement>) -> Statement {
    Statement::Block { statements, pos: P }
}

fn if_then(condition: Expr, then: Vec<Statement>) -> Statement {
    Statement::If { arms:      vec![IfArm { condition,
                                            body: block(then), }],
                    else_body: None,
                    pos:       P, }
}

fn if_else(condition: Expr, then: Vec<Statement>, otherwise: Vec<Statement>) -> Statement {
    Statement::If { arms:      vec![IfArm { condition,
                                            body: block(then), }],
                    else_body: Some(Box::new(block(otherwise))),
                    pos:       P, }
}

fn while_loop(condition: Expr, body: Vec<Statement>) -> Statement {
    Statement::While { condition, body, pos: P }
}

fn for_loop(init: Statement, condition: Expr, update: Statement, body: Vec<Statement>) -> Statement {
    Statement::For { init: Some(Box::new(init)),
                     condition,
                     update: Some(Box::new(update)),
                     body,
                     pos: P }
}

fn step(name: &str, op: StepOperator) -> Statement {
    Statement::Step { name: name.to_string(),
                      op,
                      pos: P }
}

fn run(statements: Vec<Statement>) -> Result<Vec<String>, RuntimeError> {
    let program = Program::new(statements);
    let mut evaluator = Evaluator::new(SourceText::empty()).with_sink(OutputSink::Silent);
    evaluator.run(&program)?;
    Ok(evaluator.into_output())
}

fn run_ok(statements: Vec<Statement>) -> Vec<String> {
    match run(statements) {
        Ok(output) => output,
        Err(e) => panic!("program failed: {e}"),
    }
}

fn fault(statements: Vec<Statement>) -> RuntimeErrorKind {
    match run(statements) {
        Ok(output) => panic!("program succeeded with output {output:?} but a fault was expected"),
        Err(e) => e.kind,
    }
}

// Declarations and scoping

#[test]
fn duplicate_declaration_in_same_scope_faults() {
    let kind = fault(vec![set("x", int(1)), set("x", int(2))]);
    assert_eq!(kind, RuntimeErrorKind::DuplicateDeclaration { name: "x".to_string() });
}

#[test]
fn redeclaration_in_fresh_child_scope_is_allowed() {
    let output = run_ok(vec![set("x", int(1)),
                             block(vec![set("x", int(2)), display(vec![var("x")])]),
                             display(vec![var("x")]),]);
    assert_eq!(output, ["2", "1"]);
}

#[test]
fn reassignment_mutates_nearest_enclosing_binding() {
    let output = run_ok(vec![set("x", int(1)),
                             block(vec![assign("x", int(7))]),
                             display(vec![var("x")]),]);
    assert_eq!(output, ["7"]);
}

#[test]
fn assignment_without_declaration_faults() {
    let kind = fault(vec![assign("missing", int(1))]);
    assert_eq!(kind,
               RuntimeErrorKind::UndeclaredAssignment { name: "missing".to_string() });
}

#[test]
fn reading_an_unbound_name_faults() {
    let kind = fault(vec![display(vec![var("ghost")])]);
    assert_eq!(kind, RuntimeErrorKind::UndefinedVariable { name: "ghost".to_string() });
}

#[test]
fn integral_float_narrows_when_stored_untyped() {
    // 8.0 / 2.0 is 4.0, but the untyped binding stores the integer 4.
    let output = run_ok(vec![set("x", bin(flt(8.0), BinaryOperator::Div, flt(2.0))),
                             display(vec![var("x")]),]);
    assert_eq!(output, ["4"]);
}

#[test]
fn typed_binding_keeps_the_declared_type() {
    let output = run_ok(vec![set_typed("x", TypeName::Float, int(4)),
                             display(vec![var("x")]),]);
    assert_eq!(output, ["4.0"]);
}

// Explicit-parent references

#[test]
fn parent_write_lands_in_the_ancestor_despite_local_shadow() {
    let output = run_ok(vec![block(vec![set("x", int(1)),
                                        block(vec![set("x", int(2)),
                                                   assign_parent(1, "x", int(9)),
                                                   display(vec![var("x")]),]),
                                        display(vec![var("x")]),])]);
    assert_eq!(output, ["2", "9"]);
}

#[test]
fn parent_read_bypasses_the_local_shadow() {
    let output = run_ok(vec![block(vec![set("x", int(1)),
                                        block(vec![set("x", int(2)),
                                                   display(vec![parent_var(1, "x")]),]),])]);
    assert_eq!(output, ["1"]);
}

#[test]
fn too_many_parent_levels_fault() {
    let kind = fault(vec![block(vec![set("y", parent_var(2, "x"))])]);
    assert_eq!(kind,
               RuntimeErrorKind::ScopeDepthExceeded { name:   "x".to_string(),
                                                      levels: 2, });
}

#[test]
fn parent_declaration_with_nearer_shadow_faults() {
    let kind = fault(vec![block(vec![set("x", int(1)),
                                    block(vec![set("x", int(2)),
                                               set_parent(1, "x", int(3)),]),])]);
    assert_eq!(kind,
               RuntimeErrorKind::AmbiguousShadowedDeclaration { name: "x".to_string() });
}

// Arithmetic and strings

#[test]
fn plus_concatenates_when_either_side_is_a_string() {
    let output = run_ok(vec![display(vec![bin(int(1), BinaryOperator::Add, string("x"))]),
                             display(vec![bin(string("x"), BinaryOperator::Add, int(1))]),]);
    assert_eq!(output, ["1x", "x1"]);
}

#[test]
fn subtraction_is_type_preserving() {
    let output = run_ok(vec![display(vec![bin(int(2), BinaryOperator::Sub, flt(1.0))]),
                             display(vec![bin(int(5), BinaryOperator::Sub, int(3))]),]);
    assert_eq!(output, ["1.0", "2"]);
}

#[test]
fn subtracting_from_a_string_faults() {
    let kind = fault(vec![display(vec![bin(string("a"), BinaryOperator::Sub, int(1))])]);
    assert!(matches!(kind, RuntimeErrorKind::TypeMismatch { .. }));
}

#[test]
fn division_truncates_on_integer_pairs_only() {
    let output = run_ok(vec![display(vec![bin(int(7), BinaryOperator::Div, int(2))]),
                             display(vec![bin(flt(7.0), BinaryOperator::Div, int(2))]),
                             display(vec![bin(int(7), BinaryOperator::Mod, int(2))]),]);
    assert_eq!(output, ["3", "3.5", "1"]);
}

#[test]
fn division_by_zero_faults() {
    assert_eq!(fault(vec![display(vec![bin(int(1), BinaryOperator::Div, int(0))])]),
               RuntimeErrorKind::DivisionByZero);
    assert_eq!(fault(vec![display(vec![bin(flt(1.0), BinaryOperator::Mod, flt(0.0))])]),
               RuntimeErrorKind::DivisionByZero);
}

#[test]
fn unary_negation_requires_a_number() {
    let output = run_ok(vec![display(vec![neg(int(5))])]);
    assert_eq!(output, ["-5"]);

    let kind = fault(vec![display(vec![neg(string("x"))])]);
    assert!(matches!(kind, RuntimeErrorKind::TypeMismatch { .. }));
}

// Booleans, truthiness, comparisons

#[test]
fn logic_operators_short_circuit() {
    // The unbound name after the deciding operand is never evaluated.
    let output = run_ok(vec![display(vec![logic(LogicOperator::Or,
                                                vec![boolean(true), var("unbound")])]),
                             display(vec![logic(LogicOperator::And,
                                                vec![boolean(false), var("unbound")])]),]);
    assert_eq!(output, ["true", "false"]);
}

#[test]
fn truthiness_uses_the_fixed_falsy_set() {
    let output = run_ok(vec![if_else(int(0), vec![display(vec![string("zero")])],
                                     vec![display(vec![string("falsy")])]),
                             if_else(string(""), vec![display(vec![string("empty")])],
                                     vec![display(vec![string("falsy")])]),
                             if_then(int(5), vec![display(vec![string("truthy")])]),]);
    assert_eq!(output, ["falsy", "falsy", "truthy"]);
}

#[test]
fn equality_spans_kinds_without_faulting() {
    let output = run_ok(vec![display(vec![bin(int(1), BinaryOperator::Equal, flt(1.0))]),
                             display(vec![bin(int(1), BinaryOperator::Equal, string("x"))]),
                             display(vec![bin(string("a"), BinaryOperator::NotEqual, string("b"))]),]);
    assert_eq!(output, ["true", "false", "true"]);
}

#[test]
fn ordering_requires_numeric_operands() {
    let kind = fault(vec![display(vec![bin(string("a"), BinaryOperator::Less, string("b"))])]);
    assert!(matches!(kind, RuntimeErrorKind::TypeMismatch { .. }));
}

// Control flow

#[test]
fn if_arms_run_first_true_branch_only() {
    let output = run_ok(vec![set("x", int(2)),
                             Statement::If { arms:      vec![IfArm { condition: bin(var("x"), BinaryOperator::Equal, int(1)),
                                                                     body:      block(vec![display(vec![string("one")])]), },
                                                             IfArm { condition: bin(var("x"), BinaryOperator::Equal, int(2)),
                                                                     body:      block(vec![display(vec![string("two")])]), },],
                                             else_body: Some(Box::new(block(vec![display(vec![string("other")])]))),
                                             pos:       P, },]);
    assert_eq!(output, ["two"]);
}

#[test]
fn while_loop_counts_with_reassignment() {
    let output = run_ok(vec![set("i", int(0)),
                             while_loop(bin(var("i"), BinaryOperator::Less, int(3)),
                                        vec![display(vec![var("i")]),
                                             assign("i", bin(var("i"), BinaryOperator::Add, int(1))),]),]);
    assert_eq!(output, ["0", "1", "2"]);
}

#[test]
fn break_stops_only_the_inner_loop() {
    let output = run_ok(vec![set("i", int(0)),
                             while_loop(bin(var("i"), BinaryOperator::Less, int(3)),
                                        vec![while_loop(boolean(true),
                                                        vec![if_then(boolean(true),
                                                                     vec![Statement::Break { pos: P }])]),
                                             assign("i", bin(var("i"), BinaryOperator::Add, int(1))),]),
                             display(vec![var("i")]),]);
    assert_eq!(output, ["3"]);
}

#[test]
fn while_body_scope_is_fresh_each_iteration() {
    // Declaring the same name in the body would fault if the iteration
    // scope survived between passes.
    let output = run_ok(vec![set("i", int(0)),
                             while_loop(bin(var("i"), BinaryOperator::Less, int(2)),
                                        vec![set("t", bin(var("i"), BinaryOperator::Mul, int(10))),
                                             display(vec![var("t")]),
                                             assign("i", bin(var("i"), BinaryOperator::Add, int(1))),]),]);
    assert_eq!(output, ["0", "10"]);
}

#[test]
fn while_stops_at_the_first_non_none_statement_result() {
    // A bare increment yields its new value, which ends the loop and
    // becomes the loop's own result.
    let output = run_ok(vec![set("x", int(0)),
                             while_loop(bin(var("x"), BinaryOperator::Less, int(5)),
                                        vec![step("x", StepOperator::Increment)]),
                             display(vec![var("x")]),]);
    assert_eq!(output, ["1", "1"]);
}

#[test]
fn for_loop_runs_init_condition_update() {
    let output = run_ok(vec![for_loop(set("i", int(0)),
                                      bin(var("i"), BinaryOperator::Less, int(3)),
                                      assign("i", bin(var("i"), BinaryOperator::Add, int(1))),
                                      vec![display(vec![var("i")])]),]);
    assert_eq!(output, ["0", "1", "2"]);
}

#[test]
fn for_init_waives_redeclaration_checks() {
    let output = run_ok(vec![set("i", int(9)),
                             for_loop(set("i", int(0)),
                                      bin(var("i"), BinaryOperator::Less, int(2)),
                                      assign("i", bin(var("i"), BinaryOperator::Add, int(1))),
                                      vec![display(vec![var("i")])]),
                             display(vec![var("i")]),]);
    // The initializer rebinds the enclosing `i`, so the loop leaves it at 2.
    assert_eq!(output, ["0", "1", "2"]);
}

#[test]
fn for_update_cannot_see_body_declarations() {
    let kind = fault(vec![for_loop(set("i", int(0)),
                                   bin(var("i"), BinaryOperator::Less, int(3)),
                                   assign("t", int(0)),
                                   vec![set("t", int(5)),
                                        assign("i", bin(var("i"), BinaryOperator::Add, int(1))),]),]);
    assert_eq!(kind, RuntimeErrorKind::UndeclaredAssignment { name: "t".to_string() });
}

#[test]
fn break_inside_for_stops_the_loop() {
    let output = run_ok(vec![for_loop(set("i", int(0)),
                                      boolean(true),
                                      assign("i", bin(var("i"), BinaryOperator::Add, int(1))),
                                      vec![if_then(bin(var("i"), BinaryOperator::Equal, int(2)),
                                                   vec![Statement::Break { pos: P }]),
                                           display(vec![var("i")]),]),
                             display(vec![string("done")]),]);
    assert_eq!(output, ["0", "1", "done"]);
}

// Functions, closures, return

#[test]
fn function_call_returns_through_nested_control_flow() {
    let body = vec![if_then(bin(var("n"), BinaryOperator::LessEqual, int(1)),
                            vec![ret(int(1))]),
                    ret(bin(var("n"),
                            BinaryOperator::Mul,
                            call("fact", vec![bin(var("n"), BinaryOperator::Sub, int(1))]))),];
    let output = run_ok(vec![function("fact", &["n"], body),
                             display(vec![call("fact", vec![int(5)])]),]);
    assert_eq!(output, ["120"]);
}

#[test]
fn closure_observes_mutations_made_before_the_block_exited() {
    let output = run_ok(vec![set("x", int(1)),
                             block(vec![function("f", &[], vec![ret(var("x"))]),
                                        assign("x", int(5)),]),
                             display(vec![call("f", vec![])]),]);
    assert_eq!(output, ["5"]);
}

#[test]
fn closure_keeps_its_defining_scope_alive() {
    let output = run_ok(vec![block(vec![set("y", int(41)),
                                        function("g", &[],
                                                 vec![ret(bin(var("y"), BinaryOperator::Add, int(1)))]),]),
                             display(vec![call("g", vec![])]),]);
    assert_eq!(output, ["42"]);
}

#[test]
fn capture_is_lexical_not_dynamic() {
    // `addA` was declared at the top level, so its body resolves `a`
    // against the global scope; the caller's local `a` is invisible.
    let output = run_ok(vec![set("a", int(10)),
                             function("addA", &["b"], vec![ret(bin(var("a"), BinaryOperator::Add, var("b")))]),
                             block(vec![set("a", int(99)),
                                        display(vec![call("addA", vec![int(1)])]),]),]);
    assert_eq!(output, ["11"]);
}

#[test]
fn bare_call_with_result_appends_a_result_line() {
    let output = run_ok(vec![function("seven", &[], vec![ret(int(7))]),
                             call_stmt("seven", vec![]),]);
    assert_eq!(output, ["Result: 7", "7"]);
}

#[test]
fn call_without_return_yields_the_last_statement_value() {
    let output = run_ok(vec![function("bump", &[], vec![set("a", int(1)),
                                                        step("a", StepOperator::Increment),]),
                             call_stmt("bump", vec![]),]);
    assert_eq!(output, ["Result: 2", "2"]);
}

#[test]
fn call_whose_body_yields_nothing_has_no_result_line() {
    let output = run_ok(vec![function("quiet", &[], vec![set("a", int(1))]),
                             call_stmt("quiet", vec![]),]);
    assert_eq!(output, Vec::<String>::new());
}

#[test]
fn valueless_call_inside_an_expression_faults() {
    let kind = fault(vec![function("quiet", &[], vec![set("a", int(1))]),
                          display(vec![bin(call("quiet", vec![]), BinaryOperator::Add, int(1))]),]);
    assert_eq!(kind, RuntimeErrorKind::ValuelessExpression);
}

#[test]
fn unknown_function_and_arity_faults() {
    assert_eq!(fault(vec![call_stmt("nope", vec![])]),
               RuntimeErrorKind::UnknownFunction { name: "nope".to_string() });

    let kind = fault(vec![function("f", &["a"], vec![ret(var("a"))]),
                          call_stmt("f", vec![int(1), int(2)]),]);
    assert_eq!(kind,
               RuntimeErrorKind::ArityMismatch { name:     "f".to_string(),
                                                 expected: 1,
                                                 found:    2, });
}

#[test]
fn duplicate_function_and_parameter_faults() {
    assert_eq!(fault(vec![function("f", &[], vec![]), function("f", &[], vec![])]),
               RuntimeErrorKind::DuplicateFunction { name: "f".to_string() });

    assert_eq!(fault(vec![function("g", &["a", "a"], vec![])]),
               RuntimeErrorKind::DuplicateParameter { name: "a".to_string() });
}

#[test]
fn parameter_cannot_be_redeclared_in_the_body() {
    let kind = fault(vec![function("f", &["a"], vec![set("a", int(2))]),
                          call_stmt("f", vec![int(1)]),]);
    assert_eq!(kind, RuntimeErrorKind::ParameterRedeclaration { name: "a".to_string() });
}

#[test]
fn return_outside_a_function_faults() {
    assert_eq!(fault(vec![ret(int(1))]), RuntimeErrorKind::ReturnOutsideFunction);
    assert_eq!(fault(vec![block(vec![ret(int(1))])]),
               RuntimeErrorKind::ReturnOutsideFunction);
}

#[test]
fn call_depth_guard_trips_when_configured() {
    let program = Program::new(vec![function("f", &[], vec![ret(call("f", vec![]))]),
                                    call_stmt("f", vec![]),]);
    let config = EvalConfig { call_depth_limit: Some(16),
                              sink:             OutputSink::Silent, };
    let mut evaluator = Evaluator::new(SourceText::empty()).with_config(config);
    let err = evaluator.run(&program).unwrap_err();
    assert_eq!(err.kind, RuntimeErrorKind::CallDepthExceeded { limit: 16 });
}

// Matrices

#[test]
fn transpose_swaps_rows_and_columns() {
    let output = run_ok(vec![display(vec![transpose(matrix(vec![vec![int(1), int(2)],
                                                                vec![int(3), int(4)],]))])]);
    assert_eq!(output, ["[[1, 3], [2, 4]]"]);
}

#[test]
fn invert_uses_the_closed_form_2x2_inverse() {
    let expected = matrix(vec![vec![neg(flt(2.0)), flt(1.0)],
                               vec![flt(1.5), neg(flt(0.5))],]);
    let output = run_ok(vec![display(vec![bin(invert(matrix(vec![vec![int(1), int(2)],
                                                                 vec![int(3), int(4)],])),
                                              BinaryOperator::Equal,
                                              expected)])]);
    assert_eq!(output, ["true"]);
}

#[test]
fn invert_faults_on_zero_determinant() {
    let kind = fault(vec![display(vec![invert(matrix(vec![vec![int(1), int(2)],
                                                          vec![int(2), int(4)],]))])]);
    assert_eq!(kind, RuntimeErrorKind::NotInvertible);
}

#[test]
fn invert_faults_on_non_2x2_shapes() {
    let kind = fault(vec![display(vec![invert(matrix(vec![vec![int(1), int(2), int(3)],
                                                          vec![int(4), int(5), int(6)],]))])]);
    assert_eq!(kind,
               RuntimeErrorKind::UnsupportedDimension { rows: 2, cols: 3 });
}

#[test]
fn matrix_elements_must_be_numeric_scalars() {
    assert_eq!(fault(vec![display(vec![matrix(vec![vec![matrix(vec![vec![int(1)]])]])])]),
               RuntimeErrorKind::InvalidMatrixElement);
    assert_eq!(fault(vec![display(vec![matrix(vec![vec![string("x")]])])]),
               RuntimeErrorKind::InvalidMatrixElement);
    assert_eq!(fault(vec![display(vec![matrix(vec![vec![int(1), int(2)], vec![int(3)]])])]),
               RuntimeErrorKind::InvalidMatrixElement);
}

#[test]
fn matrix_equality_is_deep_and_numeric() {
    let output = run_ok(vec![set("m", matrix(vec![vec![int(1), int(2)]])),
                             display(vec![bin(var("m"),
                                              BinaryOperator::Equal,
                                              matrix(vec![vec![flt(1.0), flt(2.0)]]))]),]);
    assert_eq!(output, ["true"]);
}

// Built-ins

#[test]
fn builtins_compute_in_floats() {
    let output = run_ok(vec![display(vec![builtin(Builtin::Power, vec![int(2), int(3)])]),
                             display(vec![builtin(Builtin::Sin, vec![int(0)])]),
                             display(vec![builtin(Builtin::Cos, vec![int(0)])]),]);
    assert_eq!(output, ["8.0", "0.0", "1.0"]);
}

#[test]
fn cotan_of_a_zero_tangent_faults() {
    assert_eq!(fault(vec![display(vec![builtin(Builtin::Cotan, vec![int(0)])])]),
               RuntimeErrorKind::DivisionByZero);
}

// Casts

#[test]
fn casts_follow_the_shared_routine() {
    let output = run_ok(vec![display(vec![cast(TypeName::Int, string("3.9"))]),
                             display(vec![cast(TypeName::Int, boolean(true))]),
                             display(vec![cast(TypeName::Bool, string("TRUE"))]),
                             display(vec![cast(TypeName::Bool, int(0))]),
                             display(vec![cast(TypeName::Str, flt(3.5))]),
                             display(vec![cast(TypeName::Float, int(2))]),]);
    assert_eq!(output, ["3", "1", "true", "false", "3.5", "2.0"]);
}

#[test]
fn impossible_casts_fault() {
    assert!(matches!(fault(vec![display(vec![cast(TypeName::Float, string("abc"))])]),
                     RuntimeErrorKind::InvalidCast { .. }));
    assert!(matches!(fault(vec![display(vec![cast(TypeName::Matrix, int(1))])]),
                     RuntimeErrorKind::InvalidCast { .. }));
}

#[test]
fn typed_declaration_casts_on_storage() {
    let output = run_ok(vec![set_typed("x", TypeName::Int, flt(3.7)),
                             display(vec![var("x")]),]);
    assert_eq!(output, ["3"]);
}

// Increment / decrement

#[test]
fn step_mutates_in_place_and_yields_the_new_value() {
    let output = run_ok(vec![set("x", int(0)),
                             step("x", StepOperator::Increment),
                             step("x", StepOperator::Decrement),
                             display(vec![var("x")]),]);
    // Each top-level step appends its yielded value to the log.
    assert_eq!(output, ["1", "0", "0"]);
}

#[test]
fn step_faults_on_unbound_or_non_numeric_targets() {
    assert_eq!(fault(vec![step("x", StepOperator::Increment)]),
               RuntimeErrorKind::UndefinedVariable { name: "x".to_string() });
    assert_eq!(fault(vec![set("s", string("hi")), step("s", StepOperator::Increment)]),
               RuntimeErrorKind::NonNumericIncrement { name: "s".to_string() });
}

// Compound assignment

#[test]
fn compound_assignment_updates_and_yields() {
    let output = run_ok(vec![set("x", int(2)),
                             compound("x", BinaryOperator::Add, int(3)),
                             compound("x", BinaryOperator::Mul, int(4)),
                             display(vec![var("x")]),]);
    assert_eq!(output, ["5", "20", "20"]);
}

#[test]
fn compound_assignment_requires_an_existing_binding() {
    assert_eq!(fault(vec![compound("x", BinaryOperator::Add, int(1))]),
               RuntimeErrorKind::UndeclaredAssignment { name: "x".to_string() });
}

// Display and output log

#[test]
fn display_joins_operands_with_single_spaces() {
    let output = run_ok(vec![display(vec![string("a"), int(1), boolean(true)])]);
    assert_eq!(output, ["a 1 true"]);
}

#[test]
fn output_before_a_fault_is_retained() {
    let program = Program::new(vec![display(vec![string("first")]),
                                    display(vec![var("ghost")]),]);
    let mut evaluator = Evaluator::new(SourceText::empty()).with_sink(OutputSink::Silent);
    assert!(evaluator.run(&program).is_err());
    assert_eq!(evaluator.output(), ["first"]);
}

#[test]
fn initial_bindings_are_visible_to_the_program() {
    let program = Program::new(vec![display(vec![var("answer")])]);
    let mut evaluator = Evaluator::new(SourceText::empty()).with_sink(OutputSink::Silent);
    evaluator.define_global("answer", Value::Integer(42));
    evaluator.run(&program).unwrap();
    assert_eq!(evaluator.output(), ["42"]);
}

// Diagnostics

#[test]
fn diagnostics_quote_the_source_line_with_a_caret() {
    let source = "set y = ghost + 1";
    let program = Program::new(vec![Statement::Declare { target:        AssignTarget::plain("y".to_string()),
                                                         declared_type: None,
                                                         value:         Expr::Identifier { name: "ghost".to_string(),
                                                                                           pos:  Pos::new(1, 8), },
                                                         pos:           Pos::new(1, 0), }]);
    let mut evaluator = Evaluator::new(SourceText::new(source)).with_sink(OutputSink::Silent);
    let rendered = evaluator.run(&program).unwrap_err().to_string();

    assert!(rendered.contains("Undefined variable 'ghost'"), "{rendered}");
    assert!(rendered.contains("at line 1"), "{rendered}");
    assert!(rendered.contains("set y = ghost + 1"), "{rendered}");
    assert!(rendered.contains("        ^"), "{rendered}");
    assert!(rendered.contains("suggestion:"), "{rendered}");
}
