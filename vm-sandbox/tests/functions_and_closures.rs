use vm_sandbox::{evaluate, Context, Value, VmError, VmOptions};

fn eval(source: &str) -> Value {
  evaluate(source, &Context::default(), &VmOptions::default()).unwrap()
}

fn eval_err(source: &str) -> VmError {
  evaluate(source, &Context::default(), &VmOptions::default()).unwrap_err()
}

#[test]
fn function_decl_and_call() {
  assert_eq!(
    eval("function add(a, b) { return a + b; } add(1, 2)"),
    Value::Number(3.0)
  );
}

#[test]
fn function_without_return_yields_undefined() {
  assert_eq!(eval("function f() { 42; } f()"), Value::Undefined);
}

#[test]
fn missing_arguments_bind_undefined() {
  assert_eq!(
    eval("function f(a, b) { return b; } f(1)"),
    Value::Undefined
  );
}

#[test]
fn function_expression_and_arrow_forms() {
  assert_eq!(eval("const f = function (x) { return x * 2; }; f(3)"), Value::Number(6.0));
  assert_eq!(eval("const f = x => x * 2; f(4)"), Value::Number(8.0));
  assert_eq!(eval("const f = (a, b) => { return a + b; }; f(1, 2)"), Value::Number(3.0));
  assert_eq!(eval("((x) => x + 1)(41)"), Value::Number(42.0));
  assert_eq!(eval("(function (x) { return x + 1; })(41)"), Value::Number(42.0));
}

#[test]
fn closures_capture_their_defining_frame() {
  // Two counters advance independently.
  let source = "
    function createCounter(n) {
      let c = n;
      return function () {
        c = c + 1;
        return c;
      };
    }
    const a = createCounter(0);
    const b = createCounter(10);
    a();
    b();
    [a(), b()]
  ";
  let result = eval(source);
  assert_eq!(
    result.to_json().unwrap(),
    serde_json::json!([2, 12])
  );
}

#[test]
fn closures_share_the_captured_binding() {
  let source = "
    function pair() {
      let n = 0;
      const inc = () => { n += 1; return n; };
      const get = () => n;
      return [inc, get];
    }
    const fns = pair();
    fns[0]();
    fns[0]();
    fns[1]()
  ";
  assert_eq!(eval(source), Value::Number(2.0));
}

#[test]
fn rest_parameter_collects_remaining_arguments() {
  assert_eq!(
    eval("function f(a, ...rest) { return rest.length; } f(1, 2, 3, 4)"),
    Value::Number(3.0)
  );
  assert_eq!(
    eval("function f(...xs) { return xs[0] + xs[2]; } f(1, 2, 3)"),
    Value::Number(4.0)
  );
}

#[test]
fn spread_arguments_splice_in_order() {
  assert_eq!(
    eval("function f(...xs) { return xs.length; } f(0, ...[1, 2], 3)"),
    Value::Number(4.0)
  );
  assert_eq!(
    eval_err("function f() {} f(...5)"),
    VmError::NotIterable("5".to_string())
  );
}

#[test]
fn arguments_binding_reflects_the_actual_call() {
  assert_eq!(
    eval("function f() { return arguments.length; } f(1, 2, 3)"),
    Value::Number(3.0)
  );
  assert_eq!(
    eval("function f(a) { return arguments[1]; } f(1, 'x')"),
    Value::from("x")
  );
  // The binding is frame-local and does not leak to callers.
  assert_eq!(
    eval_err("function f() {} f(); arguments"),
    VmError::UnknownVariable("arguments".to_string())
  );
}

#[test]
fn arrow_bodies_install_their_own_arguments_binding() {
  assert_eq!(
    eval("const f = () => arguments.length; f(1, 2)"),
    Value::Number(2.0)
  );
}

#[test]
fn recursion_works_through_the_declaration_binding() {
  assert_eq!(
    eval("function fib(n) { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); } fib(10)"),
    Value::Number(55.0)
  );
}

#[test]
fn function_declarations_bind_immutably() {
  assert_eq!(
    eval_err("function f() {} f = 1"),
    VmError::CannotRedefine("f".to_string())
  );
}

#[test]
fn async_functions_are_rejected() {
  let expected = VmError::AsyncUnsupported;
  assert_eq!(eval_err("async function f() {}"), expected);
  assert_eq!(eval_err("const f = async () => 1;"), expected);
  assert_eq!(eval_err("const f = async function () {};"), expected);
  assert_eq!(expected.to_string(), "Async functions are not supported");
}

#[test]
fn destructuring_parameters_are_rejected_at_invocation() {
  assert_eq!(
    eval_err("function f([a]) { return a; } f([1])"),
    VmError::UnsupportedPattern("ArrayPattern")
  );
  assert_eq!(
    eval_err("function f({a}) { return a; } f({a: 1})"),
    VmError::UnsupportedPattern("ObjectPattern")
  );
}

#[test]
fn calling_a_non_function_reports_the_callee_name() {
  assert_eq!(
    eval_err("const x = 1; x()"),
    VmError::NotAFunction("x".to_string())
  );
  assert_eq!(
    eval_err("nothing()"),
    VmError::NotAFunction("nothing".to_string())
  );
  assert_eq!(
    eval_err("const o = {}; o.m()"),
    VmError::NotAFunction("m".to_string())
  );
  assert_eq!(
    eval_err("const o = {}; o.m()").to_string(),
    "m is not a function"
  );
}
