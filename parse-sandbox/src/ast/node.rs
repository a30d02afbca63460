use crate::loc::Loc;
use serde::Serialize;

/// A syntax node: a source location plus the node's syntax-specific data.
///
/// Variant data lives behind a `Box` so the wrapping `Expr`/`Stmt` enums stay small.
#[derive(Debug, Clone, Serialize)]
pub struct Node<S> {
  pub loc: Loc,
  pub stx: Box<S>,
}

impl<S> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
    }
  }
}
