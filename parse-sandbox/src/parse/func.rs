use super::Parser;
use crate::ast::expr::ArrPat;
use crate::ast::expr::IdPat;
use crate::ast::expr::ObjPat;
use crate::ast::expr::Pat;
use crate::ast::func::ParamDecl;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub(crate) fn parse_func_params(&mut self) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.require(TT::ParenthesisOpen)?;
    let mut parameters = Vec::new();
    loop {
      if self.peek().typ == TT::ParenthesisClose {
        break;
      }
      let rest_loc = if self.peek().typ == TT::DotDotDot {
        Some(self.next().loc)
      } else {
        None
      };
      let pattern = self.parse_pattern()?;
      let loc = match rest_loc {
        Some(mut loc) => {
          loc.extend(pattern.loc);
          loc
        }
        None => pattern.loc,
      };
      parameters.push(Node::new(
        loc,
        ParamDecl {
          rest: rest_loc.is_some(),
          pattern,
        },
      ));
      if rest_loc.is_some() && self.peek().typ != TT::ParenthesisClose {
        return Err(self
          .peek()
          .error(SyntaxErrorType::ExpectedSyntax("rest parameter in last position")));
      }
      if !self.consume_if(TT::Comma) {
        break;
      }
    }
    self.require(TT::ParenthesisClose)?;
    Ok(parameters)
  }

  // Parses a `{ ... }` function body, tracking function depth so nested `return` statements are
  // accepted. Returns the statements and the closing brace's location.
  pub(crate) fn parse_func_block_body(&mut self) -> SyntaxResult<(Vec<Node<Stmt>>, Loc)> {
    self.require(TT::BraceOpen)?;
    self.func_depth += 1;
    let result = self.parse_stmts_until_brace_close();
    self.func_depth -= 1;
    let body = result?;
    let close = self.require(TT::BraceClose)?;
    Ok((body, close.loc))
  }

  /// Parses a binding pattern in declarator or parameter position.
  ///
  /// Array and object patterns are consumed structurally (balanced brackets) but their contents
  /// are not represented; the evaluator rejects them by kind.
  pub(crate) fn parse_pattern(&mut self) -> SyntaxResult<Node<Pat>> {
    let tok = self.peek();
    match tok.typ {
      TT::Identifier | TT::KeywordAsync => {
        self.next();
        Ok(Node::new(
          tok.loc,
          Pat::Id(Node::new(
            tok.loc,
            IdPat {
              name: self.string(tok.loc),
            },
          )),
        ))
      }
      TT::BracketOpen => {
        let loc = self.skip_balanced(TT::BracketOpen, TT::BracketClose)?;
        Ok(Node::new(loc, Pat::Arr(Node::new(loc, ArrPat {}))))
      }
      TT::BraceOpen => {
        let loc = self.skip_balanced(TT::BraceOpen, TT::BraceClose)?;
        Ok(Node::new(loc, Pat::Obj(Node::new(loc, ObjPat {}))))
      }
      _ => Err(tok.error(SyntaxErrorType::ExpectedSyntax("variable binding pattern"))),
    }
  }

  fn skip_balanced(&mut self, open: TT, close: TT) -> SyntaxResult<Loc> {
    let first = self.require(open)?;
    let mut end = first.loc;
    let mut depth = 1usize;
    while depth > 0 {
      let tok = self.next();
      if tok.typ == TT::EOF {
        return Err(tok.error(SyntaxErrorType::UnexpectedEnd));
      }
      if tok.typ == open {
        depth += 1;
      } else if tok.typ == close {
        depth -= 1;
      }
      end = tok.loc;
    }
    let mut loc = first.loc;
    loc.extend(end);
    Ok(loc)
  }
}
