use super::expr::Expr;
use super::expr::Pat;
use super::func::Func;
use super::node::Node;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "$t")]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Empty(Node<EmptyStmt>),
  Expr(Node<ExprStmt>),
  FunctionDecl(Node<FuncDecl>),
  If(Node<IfStmt>),
  Return(Node<ReturnStmt>),
  VarDecl(Node<VarDecl>),
  While(Node<WhileStmt>),
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmptyStmt {}

#[derive(Debug, Clone, Serialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FuncDecl {
  pub name: String,
  pub func: Node<Func>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Node<Stmt>,
  pub alternate: Option<Node<Stmt>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

#[derive(Debug, Clone, Serialize)]
pub struct VarDeclarator {
  pub pattern: Node<Pat>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VarDecl {
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhileStmt {
  pub condition: Node<Expr>,
  pub body: Node<Stmt>,
}
