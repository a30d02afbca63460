use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::FuncDecl;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::VarDecl;
use crate::ast::stmt::VarDeclMode;
use crate::ast::stmt::VarDeclarator;
use crate::ast::stmt::WhileStmt;
use crate::ast::stx::TopLevel;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

fn span(start: Loc, end: Loc) -> Loc {
  let mut loc = start;
  loc.extend(end);
  loc
}

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let mut body = Vec::new();
    while self.peek().typ != TT::EOF {
      body.push(self.parse_stmt()?);
    }
    Ok(Node::new(self.source_range(), TopLevel { body }))
  }

  pub(crate) fn parse_stmts_until_brace_close(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut body = Vec::new();
    while !matches!(self.peek().typ, TT::BraceClose | TT::EOF) {
      body.push(self.parse_stmt()?);
    }
    Ok(body)
  }

  pub fn parse_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let tok = self.peek();
    match tok.typ {
      TT::BraceOpen => self.parse_block_stmt(),
      TT::Semicolon => {
        self.next();
        Ok(Node::new(tok.loc, Stmt::Empty(Node::new(tok.loc, EmptyStmt {}))))
      }
      TT::KeywordLet | TT::KeywordConst | TT::KeywordVar => self.parse_var_decl(),
      TT::KeywordFunction => {
        self.next();
        self.parse_func_decl(tok.loc, false)
      }
      TT::KeywordAsync => {
        let checkpoint = self.checkpoint();
        self.next();
        if self.peek().typ == TT::KeywordFunction && !self.peek().preceded_by_line_terminator {
          self.next();
          return self.parse_func_decl(tok.loc, true);
        }
        self.restore_checkpoint(checkpoint);
        self.parse_expr_stmt()
      }
      TT::KeywordIf => self.parse_if_stmt(),
      TT::KeywordWhile => self.parse_while_stmt(),
      TT::KeywordReturn => self.parse_return_stmt(),
      _ => self.parse_expr_stmt(),
    }
  }

  fn require_statement_terminator(&mut self) -> SyntaxResult<()> {
    if self.consume_if(TT::Semicolon) {
      return Ok(());
    }
    let tok = self.peek();
    if tok.typ == TT::EOF || tok.typ == TT::BraceClose || tok.preceded_by_line_terminator {
      return Ok(());
    }
    Err(tok.error(SyntaxErrorType::ExpectedSyntax("semicolon")))
  }

  fn parse_block_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let open = self.require(TT::BraceOpen)?;
    let body = self.parse_stmts_until_brace_close()?;
    let close = self.require(TT::BraceClose)?;
    let loc = span(open.loc, close.loc);
    Ok(Node::new(loc, Stmt::Block(Node::new(loc, BlockStmt { body }))))
  }

  fn parse_var_decl(&mut self) -> SyntaxResult<Node<Stmt>> {
    let tok = self.next();
    let mode = match tok.typ {
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordLet => VarDeclMode::Let,
      _ => VarDeclMode::Var,
    };
    let mut declarators = Vec::new();
    let mut end = tok.loc;
    loop {
      let pattern = self.parse_pattern()?;
      end = pattern.loc;
      let initializer = if self.consume_if(TT::Equals) {
        let value = self.parse_expr_assignment()?;
        end = value.loc;
        Some(value)
      } else {
        None
      };
      declarators.push(VarDeclarator {
        pattern,
        initializer,
      });
      if !self.consume_if(TT::Comma) {
        break;
      }
    }
    self.require_statement_terminator()?;
    let loc = span(tok.loc, end);
    Ok(Node::new(
      loc,
      Stmt::VarDecl(Node::new(loc, VarDecl { mode, declarators })),
    ))
  }

  // The `function` keyword (and any preceding `async`) has already been consumed.
  fn parse_func_decl(&mut self, start: Loc, async_: bool) -> SyntaxResult<Node<Stmt>> {
    let name_tok = self.require(TT::Identifier)?;
    let name = self.string(name_tok.loc);
    let parameters = self.parse_func_params()?;
    let (body, end) = self.parse_func_block_body()?;
    let loc = span(start, end);
    let func = Node::new(
      loc,
      Func {
        arrow: false,
        async_,
        parameters,
        body: FuncBody::Block(body),
      },
    );
    Ok(Node::new(
      loc,
      Stmt::FunctionDecl(Node::new(loc, FuncDecl { name, func })),
    ))
  }

  fn parse_if_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordIf)?;
    self.require(TT::ParenthesisOpen)?;
    let test = self.parse_expr()?;
    self.require(TT::ParenthesisClose)?;
    let consequent = self.parse_stmt()?;
    let mut end = consequent.loc;
    let alternate = if self.consume_if(TT::KeywordElse) {
      let stmt = self.parse_stmt()?;
      end = stmt.loc;
      Some(stmt)
    } else {
      None
    };
    let loc = span(start.loc, end);
    Ok(Node::new(
      loc,
      Stmt::If(Node::new(
        loc,
        IfStmt {
          test,
          consequent,
          alternate,
        },
      )),
    ))
  }

  fn parse_while_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordWhile)?;
    self.require(TT::ParenthesisOpen)?;
    let condition = self.parse_expr()?;
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    let loc = span(start.loc, body.loc);
    Ok(Node::new(
      loc,
      Stmt::While(Node::new(loc, WhileStmt { condition, body })),
    ))
  }

  fn parse_return_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordReturn)?;
    if !self.in_function() && !self.allow_return_outside_function() {
      return Err(start.error(SyntaxErrorType::ReturnOutsideFunction));
    }
    let mut end = start.loc;
    let value = if matches!(
      self.peek().typ,
      TT::Semicolon | TT::BraceClose | TT::EOF
    ) || self.peek().preceded_by_line_terminator
    {
      None
    } else {
      let expr = self.parse_expr()?;
      end = expr.loc;
      Some(expr)
    };
    self.require_statement_terminator()?;
    let loc = span(start.loc, end);
    Ok(Node::new(
      loc,
      Stmt::Return(Node::new(loc, ReturnStmt { value })),
    ))
  }

  fn parse_expr_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let expr = self.parse_expr()?;
    self.require_statement_terminator()?;
    let loc = expr.loc;
    Ok(Node::new(loc, Stmt::Expr(Node::new(loc, ExprStmt { expr }))))
  }
}
