use super::expr::Expr;
use super::expr::Pat;
use super::node::Node;
use super::stmt::Stmt;
use serde::Serialize;

// One common type for all function forms (declaration, expression, arrow), as one type is easier
// to match on and wrangle downstream than many different types.
#[derive(Debug, Clone, Serialize)]
pub struct Func {
  pub arrow: bool,
  pub async_: bool,
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: FuncBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamDecl {
  pub rest: bool,
  pub pattern: Node<Pat>,
}

// A function body is distinct from a block statement: the scope starts at the parameters, not the
// braces, and an arrow shorthand body is an expression.
#[derive(Debug, Clone, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  Expression(Node<Expr>),
}
