use super::func::Func;
use super::node::Node;
use crate::operator::OperatorName;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "$t")]
pub enum Expr {
  Arrow(Node<ArrowFuncExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Chain(Node<ChainExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitStr(Node<LitStrExpr>),
  LitTemplate(Node<LitTemplateExpr>),
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinaryExpr {
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallArg {
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallExpr {
  pub optional_chaining: bool,
  pub callee: Node<Expr>,
  pub arguments: Vec<CallArg>,
}

/// Wraps the outermost member/call chain that contains at least one optional link. The evaluator's
/// safe-navigation signal never propagates past this node.
#[derive(Debug, Clone, Serialize)]
pub struct ChainExpr {
  pub expr: Node<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComputedMemberExpr {
  pub optional_chaining: bool,
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FuncExpr {
  pub name: Option<String>,
  pub func: Node<Func>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdExpr {
  pub name: String,
}

// Dedicated type (instead of reusing IdExpr for the right side) as the property name is not a
// variable usage.
#[derive(Debug, Clone, Serialize)]
pub struct MemberExpr {
  pub optional_chaining: bool,
  pub left: Node<Expr>,
  pub right: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnaryExpr {
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnaryPostfixExpr {
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrElem {
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<ArrElem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LitBoolExpr {
  pub value: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Clone, Serialize)]
pub struct LitNumExpr {
  pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub enum ObjKey {
  Direct(String),
  Computed(Node<Expr>),
}

#[derive(Debug, Clone, Serialize)]
pub enum ObjMember {
  Valued { key: ObjKey, value: Node<Expr> },
  Shorthand { name: String },
  Spread { value: Node<Expr> },
}

#[derive(Debug, Clone, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<ObjMember>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LitStrExpr {
  pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub enum LitTemplatePart {
  String(String),
  Substitution(Node<Expr>),
}

#[derive(Debug, Clone, Serialize)]
pub struct LitTemplateExpr {
  pub parts: Vec<LitTemplatePart>,
}

/// Binding patterns, as they appear in declarator and parameter position.
///
/// Array and object patterns are recognized syntactically so the evaluator can reject them with a
/// precise unsupported-pattern error; their contents are not retained.
#[derive(Debug, Clone, Serialize)]
pub enum Pat {
  Id(Node<IdPat>),
  Arr(Node<ArrPat>),
  Obj(Node<ObjPat>),
}

impl Pat {
  /// The reference language's node-kind name, used verbatim in unsupported-pattern errors.
  pub fn kind_name(&self) -> &'static str {
    match self {
      Pat::Id(_) => "Identifier",
      Pat::Arr(_) => "ArrayPattern",
      Pat::Obj(_) => "ObjectPattern",
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct IdPat {
  pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrPat {}

#[derive(Debug, Clone, Serialize)]
pub struct ObjPat {}
