use super::node::Node;
use super::stmt::Stmt;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TopLevel {
  pub body: Vec<Node<Stmt>>,
}
