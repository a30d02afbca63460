use crate::ast::expr::Expr;
use crate::ast::expr::LitTemplatePart;
use crate::ast::expr::ObjMember;
use crate::ast::expr::Pat;
use crate::ast::func::FuncBody;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::VarDeclMode;
use crate::ast::stx::TopLevel;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::operator::OperatorName;
use crate::parse::ParseOptions;
use crate::parse_with_options;

fn parse(source: &str) -> Node<TopLevel> {
  crate::parse(source).unwrap()
}

fn only_expr(top: &Node<TopLevel>) -> &Expr {
  assert_eq!(top.stx.body.len(), 1, "expected a single statement");
  match &*top.stx.body[0].stx {
    Stmt::Expr(stmt) => &stmt.stx.expr.stx,
    other => panic!("expected expression statement, got {:?}", other),
  }
}

#[test]
fn binary_precedence_binds_multiplication_tighter() {
  let top = parse("1 + 2 * 3;");
  let Expr::Binary(add) = only_expr(&top) else {
    panic!("expected binary expression");
  };
  assert_eq!(add.stx.operator, OperatorName::Addition);
  let Expr::Binary(mul) = &*add.stx.right.stx else {
    panic!("expected right operand to be the multiplication");
  };
  assert_eq!(mul.stx.operator, OperatorName::Multiplication);
}

#[test]
fn exponentiation_is_right_associative() {
  let top = parse("2 ** 3 ** 2;");
  let Expr::Binary(outer) = only_expr(&top) else {
    panic!("expected binary expression");
  };
  assert_eq!(outer.stx.operator, OperatorName::Exponentiation);
  let Expr::Binary(inner) = &*outer.stx.right.stx else {
    panic!("expected nested exponentiation on the right");
  };
  assert_eq!(inner.stx.operator, OperatorName::Exponentiation);
}

#[test]
fn optional_chain_is_wrapped_in_chain_node() {
  let top = parse("a?.b.c;");
  let Expr::Chain(chain) = only_expr(&top) else {
    panic!("expected chain expression");
  };
  let Expr::Member(outer) = &*chain.stx.expr.stx else {
    panic!("expected member expression inside chain");
  };
  assert_eq!(outer.stx.right, "c");
  assert!(!outer.stx.optional_chaining);
  let Expr::Member(inner) = &*outer.stx.left.stx else {
    panic!("expected inner member expression");
  };
  assert!(inner.stx.optional_chaining);
}

#[test]
fn non_optional_member_chain_is_not_wrapped() {
  let top = parse("a.b.c;");
  assert!(matches!(only_expr(&top), Expr::Member(_)));
}

#[test]
fn assignment_to_optional_chain_is_rejected() {
  let err = crate::parse("a?.b = 1;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
}

#[test]
fn arrow_functions_parse_in_all_forms() {
  for source in ["x => x + 1;", "(x) => x + 1;", "(a, b) => { return a; };", "() => 1;"] {
    let top = parse(source);
    assert!(
      matches!(only_expr(&top), Expr::Arrow(_)),
      "expected arrow for {:?}",
      source
    );
  }
}

#[test]
fn parenthesized_expression_is_not_an_arrow() {
  let top = parse("(a);");
  assert!(matches!(only_expr(&top), Expr::Id(_)));
}

#[test]
fn rest_parameter_must_be_last() {
  let err = crate::parse("function f(...rest, x) {}").unwrap_err();
  assert_eq!(
    err.typ,
    SyntaxErrorType::ExpectedSyntax("rest parameter in last position")
  );
}

#[test]
fn template_literal_interleaves_parts() {
  let top = parse("`a${x}b${y}c`;");
  let Expr::LitTemplate(template) = only_expr(&top) else {
    panic!("expected template literal");
  };
  let kinds = template
    .stx
    .parts
    .iter()
    .map(|p| match p {
      LitTemplatePart::String(s) => format!("s:{}", s),
      LitTemplatePart::Substitution(_) => "e".to_string(),
    })
    .collect::<Vec<_>>();
  assert_eq!(kinds, vec!["s:a", "e", "s:b", "e", "s:c"]);
}

#[test]
fn object_literal_supports_all_member_forms() {
  let top = parse("({ a: 1, b, [k]: 2, ...rest });");
  let Expr::LitObj(obj) = only_expr(&top) else {
    panic!("expected object literal");
  };
  assert_eq!(obj.stx.members.len(), 4);
  assert!(matches!(obj.stx.members[1], ObjMember::Shorthand { .. }));
  assert!(matches!(obj.stx.members[3], ObjMember::Spread { .. }));
}

#[test]
fn destructuring_parses_as_pattern_kinds() {
  let top = parse("let [a] = xs;");
  let Stmt::VarDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected declaration");
  };
  assert_eq!(decl.stx.mode, VarDeclMode::Let);
  assert!(matches!(&*decl.stx.declarators[0].pattern.stx, Pat::Arr(_)));
}

#[test]
fn return_outside_function_is_gated_by_option() {
  assert_eq!(
    crate::parse("return 1;").unwrap_err().typ,
    SyntaxErrorType::ReturnOutsideFunction
  );
  let top = parse_with_options("return 1;", ParseOptions {
    allow_return_outside_function: true,
  })
  .unwrap();
  assert!(matches!(&*top.stx.body[0].stx, Stmt::Return(_)));
}

#[test]
fn async_function_flag_is_recorded() {
  let top = parse("async function f() {}");
  let Stmt::FunctionDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected function declaration");
  };
  assert!(decl.stx.func.stx.async_);
  assert!(matches!(decl.stx.func.stx.body, FuncBody::Block(_)));
}

#[test]
fn async_identifier_still_usable_as_variable() {
  let top = parse("async + 1;");
  let Expr::Binary(add) = only_expr(&top) else {
    panic!("expected binary expression");
  };
  let Expr::Id(id) = &*add.stx.left.stx else {
    panic!("expected identifier");
  };
  assert_eq!(id.stx.name, "async");
}

#[test]
fn statements_accept_asi_before_brace_and_newline() {
  let top = parse("let i = 0; while (i < 5) { i += 1 }\ni");
  assert_eq!(top.stx.body.len(), 3);
}

#[test]
fn syntax_error_reports_line_and_column() {
  let source = "let a = 1;\nlet b = ;";
  let err = crate::parse(source).unwrap_err();
  let (line, _col) = err.loc.line_col(source);
  assert_eq!(line, 2);
}
