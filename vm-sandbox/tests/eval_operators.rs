use vm_sandbox::{evaluate, Context, Value, VmError, VmOptions};

fn eval(source: &str) -> Value {
  evaluate(source, &Context::default(), &VmOptions::default()).unwrap()
}

fn eval_err(source: &str) -> VmError {
  evaluate(source, &Context::default(), &VmOptions::default()).unwrap_err()
}

#[test]
fn arithmetic() {
  assert_eq!(eval("1 + 2"), Value::Number(3.0));
  assert_eq!(eval("10 - 4 * 2"), Value::Number(2.0));
  assert_eq!(eval("7 % 3"), Value::Number(1.0));
  assert_eq!(eval("2 ** 10"), Value::Number(1024.0));
  assert_eq!(eval("1 / 0"), Value::Number(f64::INFINITY));
}

#[test]
fn addition_is_string_polymorphic() {
  assert_eq!(eval("'1' + 2"), Value::from("12"));
  assert_eq!(eval("1 + '2'"), Value::from("12"));
  assert_eq!(eval("'a' + 'b'"), Value::from("ab"));
  assert_eq!(eval("1 + 2 + '3'"), Value::from("33"));
  assert_eq!(eval("'' + [1, 2]"), Value::from("1,2"));
  assert_eq!(eval("'' + {}"), Value::from("[object Object]"));
}

#[test]
fn subtraction_coerces_strings_to_numbers() {
  assert_eq!(eval("'10' - 3"), Value::Number(7.0));
}

#[test]
fn nan_is_contagious() {
  let Value::Number(n) = eval("'x' - 1") else {
    panic!("expected a number");
  };
  assert!(n.is_nan());
}

#[test]
fn comparisons() {
  assert_eq!(eval("1 < 2"), Value::Bool(true));
  assert_eq!(eval("2 <= 2"), Value::Bool(true));
  assert_eq!(eval("'a' < 'b'"), Value::Bool(true));
  assert_eq!(eval("'10' < '9'"), Value::Bool(true));
  assert_eq!(eval("10 < 9"), Value::Bool(false));
}

#[test]
fn equality_operators() {
  assert_eq!(eval("1 == '1'"), Value::Bool(true));
  assert_eq!(eval("1 === '1'"), Value::Bool(false));
  assert_eq!(eval("null == undefined"), Value::Bool(true));
  assert_eq!(eval("null === undefined"), Value::Bool(false));
  assert_eq!(eval("1 != 2"), Value::Bool(true));
  assert_eq!(eval("1 !== 1"), Value::Bool(false));
  assert_eq!(eval("const a = [1]; a === a"), Value::Bool(true));
  assert_eq!(eval("[1] === [1]"), Value::Bool(false));
}

#[test]
fn bitwise_operators() {
  assert_eq!(eval("12 & 10"), Value::Number(8.0));
  assert_eq!(eval("12 | 3"), Value::Number(15.0));
  assert_eq!(eval("12 ^ 10"), Value::Number(6.0));
  assert_eq!(eval("1 << 5"), Value::Number(32.0));
  assert_eq!(eval("-8 >> 1"), Value::Number(-4.0));
  assert_eq!(eval("-1 >>> 0"), Value::Number(4294967295.0));
  assert_eq!(eval("~5"), Value::Number(-6.0));
}

#[test]
fn logical_operators_short_circuit_and_return_operands() {
  assert_eq!(eval("true && 'yes'"), Value::from("yes"));
  assert_eq!(eval("false && missing"), Value::Bool(false));
  assert_eq!(eval("null || 'fallback'"), Value::from("fallback"));
  assert_eq!(eval("'kept' || missing"), Value::from("kept"));
  assert_eq!(eval("null ?? 'default'"), Value::from("default"));
  assert_eq!(eval("0 ?? 'default'"), Value::Number(0.0));
  assert_eq!(eval("!0"), Value::Bool(true));
}

#[test]
fn conditional_expression() {
  assert_eq!(eval("1 < 2 ? 'a' : 'b'"), Value::from("a"));
  assert_eq!(eval("false ? 1 : true ? 2 : 3"), Value::Number(2.0));
}

#[test]
fn unary_operators() {
  assert_eq!(eval("-'5'"), Value::Number(-5.0));
  assert_eq!(eval("+'5'"), Value::Number(5.0));
  assert_eq!(eval("typeof 1"), Value::from("number"));
  assert_eq!(eval("typeof 'x'"), Value::from("string"));
  assert_eq!(eval("typeof null"), Value::from("object"));
  assert_eq!(eval("typeof undefined"), Value::from("undefined"));
  assert_eq!(eval("typeof neverDeclared"), Value::from("undefined"));
  assert_eq!(eval("typeof (() => 1)"), Value::from("function"));
}

#[test]
fn template_literals_concatenate_left_to_right() {
  assert_eq!(eval("const n = 2; `a${n}b${n + 1}c`"), Value::from("a2b3c"));
  assert_eq!(eval("`${1}${2}`"), Value::from("12"));
  assert_eq!(eval("`plain`"), Value::from("plain"));
  assert_eq!(eval("`${null} and ${undefined}`"), Value::from("null and undefined"));
}

#[test]
fn program_result_is_last_value_producing_statement() {
  assert_eq!(eval("1; 2; 3"), Value::Number(3.0));
  assert_eq!(eval("42; if (true) {}"), Value::Number(42.0));
  assert_eq!(eval("if (true) { 7 }"), Value::Number(7.0));
  // A bare (non-block) branch yields no value outward.
  assert_eq!(eval("42; if (true) 7;"), Value::Number(42.0));
  assert_eq!(eval("let x = 5;"), Value::Undefined);
}

#[test]
fn number_stringification_in_templates() {
  assert_eq!(eval("`${1/3}`"), Value::from("0.3333333333333333"));
  assert_eq!(eval("`${3.0}`"), Value::from("3"));
  assert_eq!(eval("`${0/0}`"), Value::from("NaN"));
}

#[test]
fn string_indexing_and_length() {
  assert_eq!(eval("'abc'.length"), Value::Number(3.0));
  assert_eq!(eval("'abc'[1]"), Value::from("b"));
  assert_eq!(eval("'abc'[9]"), Value::Undefined);
}

#[test]
fn unknown_variable_errors() {
  assert_eq!(
    eval_err("missing + 1"),
    VmError::UnknownVariable("missing".to_string())
  );
  assert_eq!(
    eval_err("missing + 1").to_string(),
    "Unknown variable missing"
  );
}
