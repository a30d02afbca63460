use vm_sandbox::{evaluate, Context, Value, VmError, VmOptions};

fn eval(source: &str) -> Value {
  evaluate(source, &Context::default(), &VmOptions::default()).unwrap()
}

fn eval_err(source: &str) -> VmError {
  evaluate(source, &Context::default(), &VmOptions::default()).unwrap_err()
}

#[test]
fn optional_member_short_circuits_on_nullish_receivers() {
  assert_eq!(eval("const o = null; o?.a?.b"), Value::Undefined);
  assert_eq!(eval("const o = undefined; o?.a"), Value::Undefined);
  assert_eq!(eval("const o = {a: null}; o.a?.b"), Value::Undefined);
  assert_eq!(eval("const o = {a: {b: 1}}; o?.a?.b"), Value::Number(1.0));
  assert_eq!(eval("const o = {a: [7]}; o?.a?.[0]"), Value::Number(7.0));
}

#[test]
fn short_circuit_skips_the_rest_of_the_chain_only() {
  // The chain yields undefined; operators outside the chain still run.
  assert_eq!(eval("const o = null; (o?.a) === undefined"), Value::Bool(true));
  assert_eq!(eval("const o = null; typeof o?.a"), Value::from("undefined"));
}

#[test]
fn non_optional_reads_on_nullish_receivers_raise() {
  assert_eq!(
    eval_err("const o = null; o.a"),
    VmError::NullishMemberRead {
      kind: "null",
      property: "a".to_string(),
    }
  );
  assert_eq!(
    eval_err("const o = {}; o.a.b"),
    VmError::NullishMemberRead {
      kind: "undefined",
      property: "b".to_string(),
    }
  );
  assert_eq!(
    eval_err("const o = null; o.a").to_string(),
    "Cannot read properties of null (reading 'a')"
  );
  // An unbound object-position identifier defers to the member reader's error.
  assert_eq!(
    eval_err("neverDeclared.prop"),
    VmError::NullishMemberRead {
      kind: "undefined",
      property: "prop".to_string(),
    }
  );
}

#[test]
fn optional_calls_short_circuit() {
  assert_eq!(eval("const f = null; f?.()"), Value::Undefined);
  assert_eq!(eval("const o = {}; o.f?.()"), Value::Undefined);
  assert_eq!(
    eval("const o = {f: () => 3}; o.f?.()"),
    Value::Number(3.0)
  );
}

#[test]
fn delete_removes_own_keys() {
  assert_eq!(
    eval("const obj = { a: { b: 1 } }; delete obj.a.b; obj")
      .to_json()
      .unwrap(),
    serde_json::json!({"a": {}})
  );
  assert_eq!(eval("const o = {a: 1}; delete o.a; o.a"), Value::Undefined);
  assert_eq!(eval("const o = {a: 1}; delete o['a']; o.a"), Value::Undefined);
  assert_eq!(eval("const o = {}; delete o.absent"), Value::Bool(true));
}

#[test]
fn delete_on_arrays_leaves_a_hole() {
  assert_eq!(
    eval("const xs = [1, 2, 3]; delete xs[1]; [xs.length, xs[1]]"),
    Value::Array(vm_sandbox::JsArray::new(vec![
      Value::Number(3.0),
      Value::Undefined,
    ]))
  );
}

#[test]
fn delete_through_a_short_circuiting_chain_yields_true() {
  assert_eq!(eval("const o = null; delete o?.a"), Value::Bool(true));
  assert_eq!(eval("const o = null; delete o?.a.b"), Value::Bool(true));
}

#[test]
fn delete_of_a_non_member_is_an_error() {
  assert_eq!(
    eval_err("const x = 1; delete x"),
    VmError::CannotDelete("Identifier")
  );
}

#[test]
fn chain_expressions_contain_their_signal() {
  // The short-circuit must not leak past the chain into enclosing expressions.
  assert_eq!(eval("const o = null; [o?.a, 1]").to_json().unwrap(), serde_json::json!([null, 1]));
  assert_eq!(eval("const o = null; (o?.a ?? 'fell back')"), Value::from("fell back"));
}
