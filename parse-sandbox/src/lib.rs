//! Lexer and parser for the sandbox-js restricted JavaScript subset.
//!
//! The grammar covers the statement and expression forms the sandboxed evaluator executes:
//! `let`/`const`/`var` declarations, `if`/`else`, `while`, `return`, blocks, function
//! declarations/expressions/arrows, calls with spread, member access with optional chaining,
//! `delete`, increment/decrement, the full operator set, array/object literals, and template
//! literals. Syntax errors carry byte offsets convertible to line/column pairs.

use ast::node::Node;
use ast::stx::TopLevel;
use error::SyntaxResult;
use lex::Lexer;
use parse::ParseOptions;
use parse::Parser;

pub mod ast;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod parse;
pub mod token;

pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  parse_with_options(source, ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: ParseOptions) -> SyntaxResult<Node<TopLevel>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer, options);
  parser.parse_top_level()
}
