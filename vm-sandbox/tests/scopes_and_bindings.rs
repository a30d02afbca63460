use vm_sandbox::{evaluate, Context, Value, VmError, VmOptions};

fn eval(source: &str) -> Value {
  evaluate(source, &Context::default(), &VmOptions::default()).unwrap()
}

fn eval_err(source: &str) -> VmError {
  evaluate(source, &Context::default(), &VmOptions::default()).unwrap_err()
}

#[test]
fn blocks_get_their_own_frame() {
  // A shadowing declaration leaves the outer binding untouched.
  assert_eq!(eval("let x = 1; { let x = 2; } x"), Value::Number(1.0));
  // Without shadowing, writes update the nearest enclosing binding.
  assert_eq!(eval("let x = 1; { x = 2; } x"), Value::Number(2.0));
}

#[test]
fn declarations_conflict_only_within_a_frame() {
  assert_eq!(
    eval_err("let x = 1; let x = 2;"),
    VmError::AlreadyDeclared("x".to_string())
  );
  assert_eq!(
    eval_err("let x = 1; let x = 2;").to_string(),
    "x is already declared"
  );
  assert_eq!(eval("let x = 1; { let x = 2; x }"), Value::Number(2.0));
}

#[test]
fn assignment_requires_an_existing_binding() {
  assert_eq!(
    eval_err("ghost = 1"),
    VmError::UnknownBinding("ghost".to_string())
  );
  assert_eq!(eval_err("ghost = 1").to_string(), "ghost is unknown");
}

#[test]
fn const_rejects_every_form_of_mutation() {
  let expected = VmError::CannotRedefine("k".to_string());
  assert_eq!(eval_err("const k = 1; k = 2"), expected);
  assert_eq!(eval_err("const k = 1; k += 1"), expected);
  assert_eq!(eval_err("const k = 1; k **= 2"), expected);
  assert_eq!(eval_err("const k = 1; k++"), expected);
  assert_eq!(eval_err("const k = 1; --k"), expected);
  assert_eq!(expected.to_string(), "Cannot redefine property: k");
}

#[test]
fn compound_assignment_reads_and_writes_the_owning_cell() {
  assert_eq!(eval("let n = 5; n += 3; n"), Value::Number(8.0));
  assert_eq!(eval("let n = 5; { n *= 2; } n"), Value::Number(10.0));
  assert_eq!(eval("let s = 'a'; s += 'b'; s"), Value::from("ab"));
  assert_eq!(eval("let n = 8; n >>= 2; n"), Value::Number(2.0));
}

#[test]
fn increment_and_decrement_return_pre_or_post_value() {
  assert_eq!(eval("let n = 5; n++"), Value::Number(5.0));
  assert_eq!(eval("let n = 5; n++; n"), Value::Number(6.0));
  assert_eq!(eval("let n = 5; ++n"), Value::Number(6.0));
  assert_eq!(eval("let n = 5; n--; n"), Value::Number(4.0));
  assert_eq!(eval("let n = '5'; ++n"), Value::Number(6.0));
}

#[test]
fn var_declares_in_the_innermost_frame() {
  assert_eq!(eval("var x = 1; x = 2; x"), Value::Number(2.0));
}

#[test]
fn destructuring_declarations_are_rejected() {
  assert_eq!(
    eval_err("let [a] = [1];"),
    VmError::UnsupportedPattern("ArrayPattern")
  );
  assert_eq!(
    eval_err("const {a} = {a: 1};"),
    VmError::UnsupportedPattern("ObjectPattern")
  );
  assert_eq!(
    eval_err("let [a] = [1];").to_string(),
    "Unknown variable declaration ArrayPattern"
  );
}

#[test]
fn while_loops_iterate_with_per_iteration_block_scope() {
  assert_eq!(
    eval("let i = 0; let s = 0; while (i < 5) { s += i; i += 1 } s"),
    Value::Number(10.0)
  );
  assert_eq!(
    eval("let i = 0; while (i < 3) { let j = i; i += 1 } i"),
    Value::Number(3.0)
  );
}

#[test]
fn back_to_back_evaluations_are_independent() {
  let source = "let counter = 0; counter += 1; counter";
  assert_eq!(eval(source), Value::Number(1.0));
  assert_eq!(eval(source), Value::Number(1.0));
}

#[test]
fn undefined_is_not_a_binding() {
  assert_eq!(eval("undefined"), Value::Undefined);
  assert_eq!(eval("undefined == null"), Value::Bool(true));
}
