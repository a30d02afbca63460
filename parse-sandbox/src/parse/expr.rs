use super::Parser;
use crate::ast::expr::ArrElem;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ChainExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::IdPat;
use crate::ast::expr::LitArrExpr;
use crate::ast::expr::LitBoolExpr;
use crate::ast::expr::LitNullExpr;
use crate::ast::expr::LitNumExpr;
use crate::ast::expr::LitObjExpr;
use crate::ast::expr::LitStrExpr;
use crate::ast::expr::LitTemplateExpr;
use crate::ast::expr::LitTemplatePart;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::ObjKey;
use crate::ast::expr::ObjMember;
use crate::ast::expr::Pat;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::func::ParamDecl;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::decode_escapes;
use crate::lex::is_identifier_continue;
use crate::lex::is_identifier_start;
use crate::loc::Loc;
use crate::num::parse_number_literal;
use crate::operator::OperatorName;
use crate::operator::Associativity;
use crate::operator::MULTARY_OPERATOR_MAPPING;
use crate::operator::UNARY_OPERATOR_MAPPING;
use crate::token::TT;

// The lowest binding power; every operator binds at least this tightly.
const MIN_PRECEDENCE: u8 = 1;
// Binding power of an AssignmentExpression, the grammar position of initializers, argument values,
// conditional branches, and arrow bodies.
const ASSIGNMENT_PRECEDENCE: u8 = 2;

fn span(start: Loc, end: Loc) -> Loc {
  let mut loc = start;
  loc.extend(end);
  loc
}

fn wrap_chain(expr: Node<Expr>) -> Node<Expr> {
  let loc = expr.loc;
  Node::new(loc, Expr::Chain(Node::new(loc, ChainExpr { expr })))
}

fn is_valid_assignment_target(expr: &Expr) -> bool {
  matches!(
    expr,
    Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_)
  )
}

impl<'a> Parser<'a> {
  pub fn parse_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    self.parse_expr_with_min_prec(MIN_PRECEDENCE)
  }

  pub fn parse_expr_assignment(&mut self) -> SyntaxResult<Node<Expr>> {
    self.parse_expr_with_min_prec(ASSIGNMENT_PRECEDENCE)
  }

  pub fn parse_expr_with_min_prec(&mut self, min_prec: u8) -> SyntaxResult<Node<Expr>> {
    let mut left = self.parse_operand()?;
    // Set once an optional link has been parsed since `left` last left member/call position; the
    // chain wrapper is applied before any non-chain operator consumes `left`.
    let mut chain_optional = false;
    loop {
      let tok = self.peek();
      let Some(op) = MULTARY_OPERATOR_MAPPING.get(&tok.typ).copied() else {
        break;
      };
      if op.precedence < min_prec {
        break;
      }

      let continues_chain = matches!(
        op.name,
        OperatorName::MemberAccess
          | OperatorName::ComputedMemberAccess
          | OperatorName::Call
          | OperatorName::OptionalChainingMemberAccess
          | OperatorName::OptionalChainingComputedMemberAccess
          | OperatorName::OptionalChainingCall
      );
      if !continues_chain && chain_optional {
        left = wrap_chain(left);
        chain_optional = false;
      }

      match op.name {
        OperatorName::MemberAccess | OperatorName::OptionalChainingMemberAccess => {
          self.next();
          let (prop_loc, prop) = self.require_identifier_name()?;
          let optional_chaining = op.name == OperatorName::OptionalChainingMemberAccess;
          chain_optional |= optional_chaining;
          let loc = span(left.loc, prop_loc);
          left = Node::new(
            loc,
            Expr::Member(Node::new(
              loc,
              MemberExpr {
                optional_chaining,
                left,
                right: prop,
              },
            )),
          );
        }
        OperatorName::ComputedMemberAccess
        | OperatorName::OptionalChainingComputedMemberAccess => {
          self.next();
          let member = self.parse_expr()?;
          let close = self.require(TT::BracketClose)?;
          let optional_chaining =
            op.name == OperatorName::OptionalChainingComputedMemberAccess;
          chain_optional |= optional_chaining;
          let loc = span(left.loc, close.loc);
          left = Node::new(
            loc,
            Expr::ComputedMember(Node::new(
              loc,
              ComputedMemberExpr {
                optional_chaining,
                object: left,
                member,
              },
            )),
          );
        }
        OperatorName::Call | OperatorName::OptionalChainingCall => {
          self.next();
          let arguments = self.parse_call_args()?;
          let close = self.require(TT::ParenthesisClose)?;
          let optional_chaining = op.name == OperatorName::OptionalChainingCall;
          chain_optional |= optional_chaining;
          let loc = span(left.loc, close.loc);
          left = Node::new(
            loc,
            Expr::Call(Node::new(
              loc,
              CallExpr {
                optional_chaining,
                callee: left,
                arguments,
              },
            )),
          );
        }
        OperatorName::PostfixIncrement | OperatorName::PostfixDecrement => {
          // A line terminator before `++`/`--` terminates the expression statement instead.
          if tok.preceded_by_line_terminator {
            break;
          }
          if !is_valid_assignment_target(&left.stx) {
            return Err(tok.error(SyntaxErrorType::InvalidAssignmentTarget));
          }
          self.next();
          let loc = span(left.loc, tok.loc);
          left = Node::new(
            loc,
            Expr::UnaryPostfix(Node::new(
              loc,
              UnaryPostfixExpr {
                operator: op.name,
                argument: left,
              },
            )),
          );
        }
        OperatorName::Conditional => {
          self.next();
          let consequent = self.parse_expr_assignment()?;
          self.require(TT::Colon)?;
          let alternate = self.parse_expr_assignment()?;
          let loc = span(left.loc, alternate.loc);
          left = Node::new(
            loc,
            Expr::Cond(Node::new(
              loc,
              CondExpr {
                test: left,
                consequent,
                alternate,
              },
            )),
          );
        }
        name if name.is_assignment() => {
          if !is_valid_assignment_target(&left.stx) {
            return Err(tok.error(SyntaxErrorType::InvalidAssignmentTarget));
          }
          self.next();
          // Right-associative: `a = b = c` assigns `b = c` to `a`.
          let right = self.parse_expr_with_min_prec(op.precedence)?;
          let loc = span(left.loc, right.loc);
          left = Node::new(
            loc,
            Expr::Binary(Node::new(
              loc,
              BinaryExpr {
                operator: op.name,
                left,
                right,
              },
            )),
          );
        }
        _ => {
          self.next();
          let next_min = match op.associativity {
            Associativity::Left => op.precedence + 1,
            Associativity::Right => op.precedence,
          };
          let right = self.parse_expr_with_min_prec(next_min)?;
          let loc = span(left.loc, right.loc);
          left = Node::new(
            loc,
            Expr::Binary(Node::new(
              loc,
              BinaryExpr {
                operator: op.name,
                left,
                right,
              },
            )),
          );
        }
      }
    }
    if chain_optional {
      left = wrap_chain(left);
    }
    Ok(left)
  }

  fn parse_operand(&mut self) -> SyntaxResult<Node<Expr>> {
    let tok = self.peek();

    if let Some(op) = UNARY_OPERATOR_MAPPING.get(&tok.typ).copied() {
      self.next();
      let argument = self.parse_expr_with_min_prec(op.precedence)?;
      if matches!(
        op.name,
        OperatorName::PrefixIncrement | OperatorName::PrefixDecrement
      ) && !is_valid_assignment_target(&argument.stx)
      {
        return Err(tok.error(SyntaxErrorType::InvalidAssignmentTarget));
      }
      let loc = span(tok.loc, argument.loc);
      return Ok(Node::new(
        loc,
        Expr::Unary(Node::new(
          loc,
          UnaryExpr {
            operator: op.name,
            argument,
          },
        )),
      ));
    }

    match tok.typ {
      TT::ParenthesisOpen => {
        if let Some(arrow) = self.try_parse_arrow(false, tok.loc)? {
          return Ok(arrow);
        }
        self.next();
        let mut expr = self.parse_expr()?;
        let close = self.require(TT::ParenthesisClose)?;
        expr.loc = span(tok.loc, close.loc);
        Ok(expr)
      }
      TT::Identifier => {
        let tok = self.next();
        if self.peek().typ == TT::EqualsChevronRight
          && !self.peek().preceded_by_line_terminator
        {
          let param = Node::new(
            tok.loc,
            ParamDecl {
              rest: false,
              pattern: Node::new(
                tok.loc,
                Pat::Id(Node::new(
                  tok.loc,
                  IdPat {
                    name: self.string(tok.loc),
                  },
                )),
              ),
            },
          );
          return self.parse_arrow_body(tok.loc, false, vec![param]);
        }
        Ok(Node::new(
          tok.loc,
          Expr::Id(Node::new(
            tok.loc,
            IdExpr {
              name: self.string(tok.loc),
            },
          )),
        ))
      }
      TT::KeywordAsync => {
        let tok = self.next();
        if self.peek().typ == TT::KeywordFunction && !self.peek().preceded_by_line_terminator {
          return self.parse_func_expr(tok.loc, true);
        }
        if matches!(self.peek().typ, TT::Identifier | TT::ParenthesisOpen) {
          if let Some(arrow) = self.try_parse_arrow(true, tok.loc)? {
            return Ok(arrow);
          }
        }
        // `async` is not reserved; fall back to an ordinary identifier usage.
        Ok(Node::new(
          tok.loc,
          Expr::Id(Node::new(
            tok.loc,
            IdExpr {
              name: "async".to_string(),
            },
          )),
        ))
      }
      TT::KeywordFunction => {
        let tok = self.next();
        self.parse_func_expr(tok.loc, false)
      }
      TT::LiteralTrue | TT::LiteralFalse => {
        self.next();
        Ok(Node::new(
          tok.loc,
          Expr::LitBool(Node::new(
            tok.loc,
            LitBoolExpr {
              value: tok.typ == TT::LiteralTrue,
            },
          )),
        ))
      }
      TT::LiteralNull => {
        self.next();
        Ok(Node::new(
          tok.loc,
          Expr::LitNull(Node::new(tok.loc, LitNullExpr {})),
        ))
      }
      TT::LiteralNumber => {
        self.next();
        let value = parse_number_literal(self.str(tok.loc))
          .ok_or_else(|| tok.error(SyntaxErrorType::MalformedLiteralNumber))?;
        Ok(Node::new(
          tok.loc,
          Expr::LitNum(Node::new(tok.loc, LitNumExpr { value })),
        ))
      }
      TT::LiteralString => {
        self.next();
        let raw = self.str(tok.loc);
        let body = &raw[1..raw.len() - 1];
        let value = decode_escapes(body, tok.loc)?;
        Ok(Node::new(
          tok.loc,
          Expr::LitStr(Node::new(tok.loc, LitStrExpr { value })),
        ))
      }
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        self.parse_template()
      }
      TT::BracketOpen => self.parse_array_literal(),
      TT::BraceOpen => self.parse_object_literal(),
      TT::EOF => Err(tok.error(SyntaxErrorType::UnexpectedEnd)),
      _ => Err(tok.error(SyntaxErrorType::ExpectedSyntax("expression operand"))),
    }
  }

  // Accepts identifiers plus keywords and word-like literals in property-name position
  // (`obj.delete`, `obj.true`), which are not variable usages.
  pub(crate) fn require_identifier_name(&mut self) -> SyntaxResult<(Loc, String)> {
    let tok = self.next();
    let raw = self.str(tok.loc);
    let word = !raw.is_empty()
      && is_identifier_start(raw.as_bytes()[0])
      && !raw.as_bytes()[0].is_ascii_digit()
      && raw.bytes().all(is_identifier_continue);
    if tok.typ != TT::Identifier && !word {
      return Err(tok.error(SyntaxErrorType::ExpectedSyntax("member property name")));
    }
    Ok((tok.loc, raw.to_string()))
  }

  fn parse_call_args(&mut self) -> SyntaxResult<Vec<CallArg>> {
    let mut arguments = Vec::new();
    loop {
      if self.peek().typ == TT::ParenthesisClose {
        break;
      }
      let spread = self.consume_if(TT::DotDotDot);
      let value = self.parse_expr_assignment()?;
      arguments.push(CallArg { spread, value });
      if !self.consume_if(TT::Comma) {
        break;
      }
    }
    Ok(arguments)
  }

  // Attempts `(params) => body` (or, with `async_`, `async params => body`) from the current
  // position. Backtracks and returns None if the parameter list or arrow token does not match;
  // errors inside a matched body are real errors.
  fn try_parse_arrow(
    &mut self,
    async_: bool,
    start: Loc,
  ) -> SyntaxResult<Option<Node<Expr>>> {
    let checkpoint = self.checkpoint();
    let parameters = if self.peek().typ == TT::ParenthesisOpen {
      match self.parse_func_params() {
        Ok(parameters) => parameters,
        Err(_) => {
          self.restore_checkpoint(checkpoint);
          return Ok(None);
        }
      }
    } else {
      let tok = self.next();
      if tok.typ != TT::Identifier {
        self.restore_checkpoint(checkpoint);
        return Ok(None);
      }
      vec![Node::new(
        tok.loc,
        ParamDecl {
          rest: false,
          pattern: Node::new(
            tok.loc,
            Pat::Id(Node::new(
              tok.loc,
              IdPat {
                name: self.string(tok.loc),
              },
            )),
          ),
        },
      )]
    };
    if self.peek().typ != TT::EqualsChevronRight || self.peek().preceded_by_line_terminator {
      self.restore_checkpoint(checkpoint);
      return Ok(None);
    }
    self.parse_arrow_body(start, async_, parameters).map(Some)
  }

  fn parse_arrow_body(
    &mut self,
    start: Loc,
    async_: bool,
    parameters: Vec<Node<ParamDecl>>,
  ) -> SyntaxResult<Node<Expr>> {
    self.require(TT::EqualsChevronRight)?;
    let (body, end) = if self.peek().typ == TT::BraceOpen {
      let (body, end) = self.parse_func_block_body()?;
      (FuncBody::Block(body), end)
    } else {
      let expr = self.parse_expr_assignment()?;
      let end = expr.loc;
      (FuncBody::Expression(expr), end)
    };
    let loc = span(start, end);
    let func = Node::new(
      loc,
      Func {
        arrow: true,
        async_,
        parameters,
        body,
      },
    );
    Ok(Node::new(
      loc,
      Expr::Arrow(Node::new(loc, ArrowFuncExpr { func })),
    ))
  }

  // The `function` keyword (and any preceding `async`) has already been consumed.
  pub(crate) fn parse_func_expr(
    &mut self,
    start: Loc,
    async_: bool,
  ) -> SyntaxResult<Node<Expr>> {
    if async_ {
      self.require(TT::KeywordFunction)?;
    }
    let name = if self.peek().typ == TT::Identifier {
      let tok = self.next();
      Some(self.string(tok.loc))
    } else {
      None
    };
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
      Expr::Func(Node::new(loc, FuncExpr { name, func })),
    ))
  }

  fn parse_template(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc;
    let mut parts = Vec::new();
    let end;
    loop {
      let tok = self.next();
      match tok.typ {
        TT::LiteralTemplatePartString => {
          parts.push(LitTemplatePart::String(decode_escapes(
            self.str(tok.loc),
            tok.loc,
          )?));
          let expr = self.parse_expr()?;
          parts.push(LitTemplatePart::Substitution(expr));
        }
        TT::LiteralTemplatePartStringEnd => {
          parts.push(LitTemplatePart::String(decode_escapes(
            self.str(tok.loc),
            tok.loc,
          )?));
          end = tok.loc;
          break;
        }
        _ => {
          return Err(tok.error(SyntaxErrorType::ExpectedSyntax("template literal part")));
        }
      }
    }
    let loc = span(start, end);
    Ok(Node::new(
      loc,
      Expr::LitTemplate(Node::new(loc, LitTemplateExpr { parts })),
    ))
  }

  fn parse_array_literal(&mut self) -> SyntaxResult<Node<Expr>> {
    let open = self.require(TT::BracketOpen)?;
    let mut elements = Vec::new();
    loop {
      if self.peek().typ == TT::BracketClose {
        break;
      }
      if self.peek().typ == TT::Comma {
        return Err(self
          .peek()
          .error(SyntaxErrorType::ExpectedSyntax("array element")));
      }
      let spread = self.consume_if(TT::DotDotDot);
      let value = self.parse_expr_assignment()?;
      elements.push(ArrElem { spread, value });
      if !self.consume_if(TT::Comma) {
        break;
      }
    }
    let close = self.require(TT::BracketClose)?;
    let loc = span(open.loc, close.loc);
    Ok(Node::new(
      loc,
      Expr::LitArr(Node::new(loc, LitArrExpr { elements })),
    ))
  }

  fn parse_object_literal(&mut self) -> SyntaxResult<Node<Expr>> {
    let open = self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      if self.peek().typ == TT::BraceClose {
        break;
      }
      if self.consume_if(TT::DotDotDot) {
        let value = self.parse_expr_assignment()?;
        members.push(ObjMember::Spread { value });
      } else if self.peek().typ == TT::BracketOpen {
        self.next();
        let key = self.parse_expr()?;
        self.require(TT::BracketClose)?;
        self.require(TT::Colon)?;
        let value = self.parse_expr_assignment()?;
        members.push(ObjMember::Valued {
          key: ObjKey::Computed(key),
          value,
        });
      } else {
        let tok = self.peek();
        let name = match tok.typ {
          TT::LiteralString => {
            self.next();
            let raw = self.str(tok.loc);
            decode_escapes(&raw[1..raw.len() - 1], tok.loc)?
          }
          TT::LiteralNumber => {
            self.next();
            self.string(tok.loc)
          }
          _ => self.require_identifier_name()?.1,
        };
        if self.consume_if(TT::Colon) {
          let value = self.parse_expr_assignment()?;
          members.push(ObjMember::Valued {
            key: ObjKey::Direct(name),
            value,
          });
        } else if tok.typ == TT::Identifier {
          members.push(ObjMember::Shorthand { name });
        } else {
          return Err(self
            .peek()
            .error(SyntaxErrorType::ExpectedSyntax("object member value")));
        }
      }
      if !self.consume_if(TT::Comma) {
        break;
      }
    }
    let close = self.require(TT::BraceClose)?;
    let loc = span(open.loc, close.loc);
    Ok(Node::new(
      loc,
      Expr::LitObj(Node::new(loc, LitObjExpr { members })),
    ))
  }
}
