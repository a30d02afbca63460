//! The recursive AST evaluator: one arm per node kind, environments threaded through block and
//! function boundaries, and the two non-local control carriers.

use crate::env::Env;
use crate::error::VmError;
use crate::function::JsFunction;
use crate::object::array_index;
use crate::object::JsArray;
use crate::ops;
use crate::value::Value;
use crate::vm::Vm;
use parse_sandbox::ast::expr::CallExpr;
use parse_sandbox::ast::expr::Expr;
use parse_sandbox::ast::expr::LitTemplatePart;
use parse_sandbox::ast::expr::ObjKey;
use parse_sandbox::ast::expr::ObjMember;
use parse_sandbox::ast::expr::Pat;
use parse_sandbox::ast::func::Func;
use parse_sandbox::ast::func::FuncBody;
use parse_sandbox::ast::node::Node;
use parse_sandbox::ast::stmt::Stmt;
use parse_sandbox::ast::stmt::VarDecl;
use parse_sandbox::ast::stmt::VarDeclMode;
use parse_sandbox::ast::stx::TopLevel;
use parse_sandbox::operator::OperatorName;

/// Non-local exits threaded through the recursive evaluator as the `Err` side of every eval call.
///
/// `Return` unwinds to the nearest function-call boundary (or the top level, when top-level
/// `return` is permitted). `ShortCircuit` is the safe-navigation signal: raised when an optional
/// link fires on a nullish receiver, caught by the enclosing chain expression, and never visible
/// past it. Neither carrier is observable by the host; only `Error` surfaces.
pub(crate) enum Unwind {
  Error(VmError),
  Return(Value),
  ShortCircuit,
}

impl From<VmError> for Unwind {
  fn from(error: VmError) -> Unwind {
    Unwind::Error(error)
  }
}

type Exec<T> = Result<T, Unwind>;

/// Tree-walking evaluator over a parsed program.
pub(crate) struct Evaluator<'a> {
  vm: &'a Vm,
}

impl<'a> Evaluator<'a> {
  pub fn new(vm: &'a Vm) -> Evaluator<'a> {
    Evaluator { vm }
  }

  /// Runs a program against the given top-level frame and yields the program result: the value of
  /// the last value-producing statement, or the value of a top-level `return` when the parser was
  /// configured to accept one.
  pub fn eval_program(&self, top: &Node<TopLevel>, env: &Env) -> Result<Value, VmError> {
    let mut result = Value::Undefined;
    for stmt in &top.stx.body {
      match self.eval_stmt(stmt, env) {
        Ok(Some(value)) => result = value,
        Ok(None) => {}
        Err(Unwind::Return(value)) => return Ok(value),
        // Chains catch their own signal; nothing outside one can raise it.
        Err(Unwind::ShortCircuit) => return Ok(Value::Undefined),
        Err(Unwind::Error(error)) => return Err(error),
      }
    }
    Ok(result)
  }

  // Statements yield `Some` only when they produce a value that participates in the program
  // result; empty completions leave the previous result in place.
  fn eval_stmt(&self, stmt: &Node<Stmt>, env: &Env) -> Exec<Option<Value>> {
    match &*stmt.stx {
      Stmt::Empty(_) => Ok(None),
      Stmt::Expr(inner) => Ok(Some(self.eval_expr(&inner.stx.expr, env)?)),
      Stmt::Block(inner) => {
        let frame = env.child();
        self.eval_stmt_list(&inner.stx.body, &frame)
      }
      Stmt::VarDecl(inner) => {
        self.eval_var_decl(&inner.stx, env)?;
        Ok(None)
      }
      Stmt::FunctionDecl(inner) => {
        let function = self.make_function(
          Some(inner.stx.name.clone()),
          &inner.stx.func,
          env,
        )?;
        // Function declarations bind immutably.
        env.declare(&inner.stx.name, function, false)?;
        Ok(None)
      }
      Stmt::If(inner) => {
        let branch = if self.eval_expr(&inner.stx.test, env)?.is_truthy() {
          &inner.stx.consequent
        } else {
          match &inner.stx.alternate {
            Some(alternate) => alternate,
            None => return Ok(None),
          }
        };
        let value = self.eval_stmt(branch, env)?;
        // A bare (non-block) branch runs as a statement but yields nothing outward.
        match &*branch.stx {
          Stmt::Block(_) => Ok(value),
          _ => Ok(None),
        }
      }
      Stmt::While(inner) => {
        if self.vm.while_statements_disabled() {
          return Err(VmError::WhileUnavailable.into());
        }
        while self.eval_expr(&inner.stx.condition, env)?.is_truthy() {
          self.vm.check()?;
          self.eval_stmt(&inner.stx.body, env)?;
        }
        Ok(None)
      }
      Stmt::Return(inner) => {
        let value = match &inner.stx.value {
          Some(expr) => self.eval_expr(expr, env)?,
          None => Value::Undefined,
        };
        Err(Unwind::Return(value))
      }
    }
  }

  fn eval_stmt_list(&self, stmts: &[Node<Stmt>], env: &Env) -> Exec<Option<Value>> {
    let mut result = None;
    for stmt in stmts {
      if let Some(value) = self.eval_stmt(stmt, env)? {
        result = Some(value);
      }
    }
    Ok(result)
  }

  fn eval_var_decl(&self, decl: &VarDecl, env: &Env) -> Exec<()> {
    for declarator in &decl.declarators {
      let Pat::Id(id) = &*declarator.pattern.stx else {
        return Err(VmError::UnsupportedPattern(declarator.pattern.stx.kind_name()).into());
      };
      let value = match &declarator.initializer {
        Some(initializer) => self.eval_expr(initializer, env)?,
        None => Value::Undefined,
      };
      env.declare(&id.stx.name, value, decl.mode != VarDeclMode::Const)?;
    }
    Ok(())
  }

  fn eval_expr(&self, expr: &Node<Expr>, env: &Env) -> Exec<Value> {
    match &*expr.stx {
      Expr::LitBool(inner) => Ok(Value::Bool(inner.stx.value)),
      Expr::LitNull(_) => Ok(Value::Null),
      Expr::LitNum(inner) => Ok(Value::Number(inner.stx.value)),
      Expr::LitStr(inner) => Ok(Value::string(&inner.stx.value)),
      Expr::LitTemplate(inner) => {
        // Segments concatenate left-to-right with the `+` operator's string form.
        let mut out = String::new();
        for part in &inner.stx.parts {
          match part {
            LitTemplatePart::String(s) => out.push_str(s),
            LitTemplatePart::Substitution(sub) => {
              let value = self.eval_expr(sub, env)?;
              out.push_str(&ops::to_string(&value));
            }
          }
        }
        Ok(Value::from(out))
      }
      Expr::LitArr(inner) => {
        let mut elements = Vec::with_capacity(inner.stx.elements.len());
        for element in &inner.stx.elements {
          let value = self.eval_expr(&element.value, env)?;
          if element.spread {
            self.spread_into(&mut elements, value)?;
          } else {
            elements.push(value);
          }
        }
        Ok(Value::Array(JsArray::new(elements)))
      }
      Expr::LitObj(inner) => {
        let object = crate::object::JsObject::new();
        for member in &inner.stx.members {
          match member {
            ObjMember::Valued { key, value } => {
              let key = match key {
                ObjKey::Direct(name) => name.clone(),
                ObjKey::Computed(expr) => {
                  let value = self.eval_expr(expr, env)?;
                  ops::to_string(&value)
                }
              };
              let value = self.eval_expr(value, env)?;
              object.set(&key, value);
            }
            ObjMember::Shorthand { name } => {
              let value = self.eval_ident(name, env)?;
              object.set(name, value);
            }
            ObjMember::Spread { value } => {
              let value = self.eval_expr(value, env)?;
              spread_object_into(&object, &value);
            }
          }
        }
        Ok(Value::Object(object))
      }
      Expr::Id(inner) => Ok(self.eval_ident(&inner.stx.name, env)?),
      Expr::Cond(inner) => {
        if self.eval_expr(&inner.stx.test, env)?.is_truthy() {
          self.eval_expr(&inner.stx.consequent, env)
        } else {
          self.eval_expr(&inner.stx.alternate, env)
        }
      }
      Expr::Unary(inner) => self.eval_unary(inner.stx.operator, &inner.stx.argument, env),
      Expr::UnaryPostfix(inner) => {
        let delta = match inner.stx.operator {
          OperatorName::PostfixIncrement => 1.0,
          _ => -1.0,
        };
        self.eval_update(&inner.stx.argument, delta, false, env)
      }
      Expr::Binary(inner) => {
        let operator = inner.stx.operator;
        if operator.is_assignment() {
          return self.eval_assignment(operator, &inner.stx.left, &inner.stx.right, env);
        }
        match operator {
          OperatorName::LogicalAnd => {
            let left = self.eval_expr(&inner.stx.left, env)?;
            if !left.is_truthy() {
              return Ok(left);
            }
            self.eval_expr(&inner.stx.right, env)
          }
          OperatorName::LogicalOr => {
            let left = self.eval_expr(&inner.stx.left, env)?;
            if left.is_truthy() {
              return Ok(left);
            }
            self.eval_expr(&inner.stx.right, env)
          }
          OperatorName::NullishCoalescing => {
            let left = self.eval_expr(&inner.stx.left, env)?;
            if !left.is_nullish() {
              return Ok(left);
            }
            self.eval_expr(&inner.stx.right, env)
          }
          _ => {
            let left = self.eval_expr(&inner.stx.left, env)?;
            let right = self.eval_expr(&inner.stx.right, env)?;
            Ok(ops::binary(operator, &left, &right))
          }
        }
      }
      Expr::Member(inner) => {
        let object = self.eval_member_object(&inner.stx.left, env)?;
        if inner.stx.optional_chaining && object.is_nullish() {
          return Err(Unwind::ShortCircuit);
        }
        Ok(self.read_member(&object, &inner.stx.right)?)
      }
      Expr::ComputedMember(inner) => {
        let object = self.eval_member_object(&inner.stx.object, env)?;
        if inner.stx.optional_chaining && object.is_nullish() {
          return Err(Unwind::ShortCircuit);
        }
        let key = self.eval_expr(&inner.stx.member, env)?;
        Ok(self.read_member(&object, &ops::to_string(&key))?)
      }
      Expr::Chain(inner) => match self.eval_expr(&inner.stx.expr, env) {
        Err(Unwind::ShortCircuit) => Ok(Value::Undefined),
        other => other,
      },
      Expr::Call(inner) => self.eval_call(&inner.stx, env),
      Expr::Func(inner) => {
        self.make_function(inner.stx.name.clone(), &inner.stx.func, env)
      }
      Expr::Arrow(inner) => self.make_function(None, &inner.stx.func, env),
    }
  }

  fn eval_ident(&self, name: &str, env: &Env) -> Result<Value, VmError> {
    // The reserved word for the undefined value, not a binding.
    if name == "undefined" {
      return Ok(Value::Undefined);
    }
    env
      .lookup(name)
      .ok_or_else(|| VmError::UnknownVariable(name.to_string()))
  }

  // Object-position identifiers suppress the missing-name error so the member reader reports its
  // own (`Cannot read properties of undefined (reading 'x')`) instead.
  fn eval_member_object(&self, expr: &Node<Expr>, env: &Env) -> Exec<Value> {
    if let Expr::Id(id) = &*expr.stx {
      if id.stx.name == "undefined" {
        return Ok(Value::Undefined);
      }
      return Ok(env.lookup(&id.stx.name).unwrap_or(Value::Undefined));
    }
    self.eval_expr(expr, env)
  }

  fn eval_unary(
    &self,
    operator: OperatorName,
    argument: &Node<Expr>,
    env: &Env,
  ) -> Exec<Value> {
    match operator {
      OperatorName::LogicalNot => {
        let value = self.eval_expr(argument, env)?;
        Ok(Value::Bool(!value.is_truthy()))
      }
      OperatorName::UnaryNegation => {
        let value = self.eval_expr(argument, env)?;
        Ok(Value::Number(-ops::to_number(&value)))
      }
      OperatorName::UnaryPlus => {
        let value = self.eval_expr(argument, env)?;
        Ok(Value::Number(ops::to_number(&value)))
      }
      OperatorName::BitwiseNot => {
        let value = self.eval_expr(argument, env)?;
        Ok(Value::Number(!ops::to_int32(&value) as f64))
      }
      OperatorName::Typeof => {
        // `typeof missing` answers "undefined" instead of raising the unknown-variable error.
        let value = if matches!(&*argument.stx, Expr::Id(_)) {
          self.eval_member_object(argument, env)?
        } else {
          self.eval_expr(argument, env)?
        };
        Ok(Value::string(value.type_of()))
      }
      OperatorName::Delete => self.eval_delete(argument, env),
      OperatorName::PrefixIncrement => self.eval_update(argument, 1.0, true, env),
      OperatorName::PrefixDecrement => self.eval_update(argument, -1.0, true, env),
      _ => Err(Unwind::Error(VmError::UnsupportedNode("UnaryExpression"))),
    }
  }

  // Pre/post increment and decrement share one read-modify-write path; `prefix` selects which of
  // the two numbers is the expression's value.
  fn eval_update(
    &self,
    target: &Node<Expr>,
    delta: f64,
    prefix: bool,
    env: &Env,
  ) -> Exec<Value> {
    let (old, new) = match &*target.stx {
      Expr::Id(id) => {
        let name = &id.stx.name;
        let old = ops::to_number(&self.eval_ident(name, env)?);
        let new = old + delta;
        env.redefine_owner_cell(name, Value::Number(new))?;
        (old, new)
      }
      Expr::Member(member) => {
        let object = self.eval_member_object(&member.stx.left, env)?;
        let key = &member.stx.right;
        let old = ops::to_number(&self.read_member(&object, key)?);
        let new = old + delta;
        self.write_member(&object, key, Value::Number(new))?;
        (old, new)
      }
      Expr::ComputedMember(member) => {
        let object = self.eval_member_object(&member.stx.object, env)?;
        let key_value = self.eval_expr(&member.stx.member, env)?;
        let key = ops::to_string(&key_value);
        let old = ops::to_number(&self.read_member(&object, &key)?);
        let new = old + delta;
        self.write_member(&object, &key, Value::Number(new))?;
        (old, new)
      }
      _ => return Err(Unwind::Error(VmError::UnsupportedNode("UpdateExpression"))),
    };
    Ok(Value::Number(if prefix { new } else { old }))
  }

  fn eval_assignment(
    &self,
    operator: OperatorName,
    left: &Node<Expr>,
    right: &Node<Expr>,
    env: &Env,
  ) -> Exec<Value> {
    match &*left.stx {
      Expr::Id(id) => {
        let name = &id.stx.name;
        let value = match compound_base(operator) {
          None => self.eval_expr(right, env)?,
          Some(base) => {
            // Read-modify-write against the owning cell: current value first, then the right
            // operand, then the operator from the plain binary table.
            let current = self.eval_ident(name, env)?;
            let rhs = self.eval_expr(right, env)?;
            ops::binary(base, &current, &rhs)
          }
        };
        env.redefine_owner_cell(name, value.clone())?;
        Ok(value)
      }
      Expr::Member(member) => {
        // The object expression is evaluated exactly once, for both the read and the write slot.
        let object = self.eval_member_object(&member.stx.left, env)?;
        let key = &member.stx.right;
        let value = match compound_base(operator) {
          None => self.eval_expr(right, env)?,
          Some(base) => {
            let current = self.read_member(&object, key)?;
            let rhs = self.eval_expr(right, env)?;
            ops::binary(base, &current, &rhs)
          }
        };
        self.write_member(&object, key, value.clone())?;
        Ok(value)
      }
      Expr::ComputedMember(member) => {
        let object = self.eval_member_object(&member.stx.object, env)?;
        let key_value = self.eval_expr(&member.stx.member, env)?;
        let key = ops::to_string(&key_value);
        let value = match compound_base(operator) {
          None => self.eval_expr(right, env)?,
          Some(base) => {
            let current = self.read_member(&object, &key)?;
            let rhs = self.eval_expr(right, env)?;
            ops::binary(base, &current, &rhs)
          }
        };
        self.write_member(&object, &key, value.clone())?;
        Ok(value)
      }
      _ => Err(Unwind::Error(VmError::UnsupportedNode("AssignmentTarget"))),
    }
  }

  fn read_member(&self, object: &Value, key: &str) -> Result<Value, VmError> {
    match object {
      Value::Undefined => Err(VmError::NullishMemberRead {
        kind: "undefined",
        property: key.to_string(),
      }),
      Value::Null => Err(VmError::NullishMemberRead {
        kind: "null",
        property: key.to_string(),
      }),
      Value::Object(obj) => Ok(obj.get(key).unwrap_or(Value::Undefined)),
      Value::Array(array) => {
        if key == "length" {
          return Ok(Value::Number(array.len() as f64));
        }
        match array_index(key) {
          Some(index) => Ok(array.get(index).unwrap_or(Value::Undefined)),
          None => Ok(Value::Undefined),
        }
      }
      Value::String(s) => {
        if key == "length" {
          return Ok(Value::Number(s.encode_utf16().count() as f64));
        }
        match array_index(key) {
          Some(index) => Ok(
            s.chars()
              .nth(index)
              .map(|c| Value::from(c.to_string()))
              .unwrap_or(Value::Undefined),
          ),
          None => Ok(Value::Undefined),
        }
      }
      Value::Bool(_) | Value::Number(_) | Value::Function(_) | Value::Native(_) => {
        Ok(Value::Undefined)
      }
    }
  }

  fn write_member(&self, object: &Value, key: &str, value: Value) -> Result<(), VmError> {
    match object {
      Value::Undefined => Err(VmError::NullishMemberWrite {
        kind: "undefined",
        property: key.to_string(),
      }),
      Value::Null => Err(VmError::NullishMemberWrite {
        kind: "null",
        property: key.to_string(),
      }),
      Value::Object(obj) => {
        obj.set(key, value);
        Ok(())
      }
      Value::Array(array) => {
        if key == "length" {
          let len = ops::to_number(&value);
          if len.is_finite() && len >= 0.0 {
            array.set_len(len as usize);
          }
          return Ok(());
        }
        if let Some(index) = array_index(key) {
          array.set(index, value);
        }
        // Non-index keys on arrays have nowhere to live in this model; the write is dropped.
        Ok(())
      }
      // Property writes on other primitives are silently ignored, as in the reference language's
      // non-strict mode.
      _ => Ok(()),
    }
  }

  fn eval_delete(&self, target: &Node<Expr>, env: &Env) -> Exec<Value> {
    match &*target.stx {
      // A chain that short-circuits before reaching the member yields `true`.
      Expr::Chain(chain) => match self.delete_member(&chain.stx.expr, env) {
        Err(Unwind::ShortCircuit) => Ok(Value::Bool(true)),
        other => other,
      },
      Expr::Member(_) | Expr::ComputedMember(_) => self.delete_member(target, env),
      other => Err(Unwind::Error(VmError::CannotDelete(expr_kind_name(other)))),
    }
  }

  fn delete_member(&self, target: &Node<Expr>, env: &Env) -> Exec<Value> {
    match &*target.stx {
      Expr::Member(member) => {
        let object = self.eval_member_object(&member.stx.left, env)?;
        if member.stx.optional_chaining && object.is_nullish() {
          return Err(Unwind::ShortCircuit);
        }
        Ok(self.delete_key(&object, &member.stx.right)?)
      }
      Expr::ComputedMember(member) => {
        let object = self.eval_member_object(&member.stx.object, env)?;
        if member.stx.optional_chaining && object.is_nullish() {
          return Err(Unwind::ShortCircuit);
        }
        let key_value = self.eval_expr(&member.stx.member, env)?;
        Ok(self.delete_key(&object, &ops::to_string(&key_value))?)
      }
      other => Err(Unwind::Error(VmError::CannotDelete(expr_kind_name(other)))),
    }
  }

  fn delete_key(&self, object: &Value, key: &str) -> Result<Value, VmError> {
    match object {
      Value::Undefined => Err(VmError::NullishMemberRead {
        kind: "undefined",
        property: key.to_string(),
      }),
      Value::Null => Err(VmError::NullishMemberRead {
        kind: "null",
        property: key.to_string(),
      }),
      Value::Object(obj) => Ok(Value::Bool(obj.delete(key))),
      Value::Array(array) => {
        if let Some(index) = array_index(key) {
          array.delete(index);
        }
        Ok(Value::Bool(true))
      }
      _ => Ok(Value::Bool(true)),
    }
  }

  fn eval_call(&self, call: &CallExpr, env: &Env) -> Exec<Value> {
    // The callee is resolved per form: member calls carry their receiver, identifier calls
    // suppress the unknown-variable error in favor of the not-a-function message.
    let (callee, receiver, name) = match &*call.callee.stx {
      Expr::Member(member) => {
        let object = self.eval_member_object(&member.stx.left, env)?;
        if member.stx.optional_chaining && object.is_nullish() {
          return Err(Unwind::ShortCircuit);
        }
        let callee = self.read_member(&object, &member.stx.right)?;
        (callee, Some(object), member.stx.right.clone())
      }
      Expr::ComputedMember(member) => {
        let object = self.eval_member_object(&member.stx.object, env)?;
        if member.stx.optional_chaining && object.is_nullish() {
          return Err(Unwind::ShortCircuit);
        }
        let key_value = self.eval_expr(&member.stx.member, env)?;
        let key = ops::to_string(&key_value);
        let callee = self.read_member(&object, &key)?;
        (callee, Some(object), key)
      }
      Expr::Id(id) => {
        let name = id.stx.name.clone();
        match env.lookup(&name) {
          Some(callee) => (callee, None, name),
          // An unbound callee short-circuits an optional call; otherwise the unknown-variable
          // error is suppressed in favor of the not-a-function message.
          None if call.optional_chaining => return Err(Unwind::ShortCircuit),
          None => return Err(VmError::NotAFunction(name).into()),
        }
      }
      _ => {
        let callee = self.eval_expr(&call.callee, env)?;
        let name = ops::to_string(&callee);
        (callee, None, name)
      }
    };

    if call.optional_chaining && callee.is_nullish() {
      return Err(Unwind::ShortCircuit);
    }

    let mut args = Vec::with_capacity(call.arguments.len());
    for arg in &call.arguments {
      let value = self.eval_expr(&arg.value, env)?;
      if arg.spread {
        self.spread_into(&mut args, value)?;
      } else {
        args.push(value);
      }
    }

    match &callee {
      Value::Function(function) => Ok(self.call_script_function(function, args)?),
      Value::Native(native) => {
        let this = receiver.unwrap_or(Value::Undefined);
        Ok(native.call(this, &args)?)
      }
      _ => Err(VmError::NotAFunction(name).into()),
    }
  }

  /// The function invocation protocol: depth accounting, guard check, a fresh frame chained off
  /// the captured environment, parameter + `arguments` binding, then the body.
  pub(crate) fn call_script_function(
    &self,
    function: &JsFunction,
    args: Vec<Value>,
  ) -> Result<Value, VmError> {
    let _depth = self.vm.enter_call()?;
    self.vm.check()?;

    let func = function.func();
    let frame = function.captured().child();
    self.bind_parameters(&func.stx, &frame, &args)?;
    if !frame.owns("arguments") {
      frame.declare("arguments", Value::Array(JsArray::new(args)), true)?;
    }

    match &func.stx.body {
      FuncBody::Block(stmts) => match self.eval_stmt_list(stmts, &frame) {
        // A body that runs to completion without `return` yields undefined, not its last
        // statement's value.
        Ok(_) => Ok(Value::Undefined),
        Err(Unwind::Return(value)) => Ok(value),
        Err(Unwind::ShortCircuit) => Ok(Value::Undefined),
        Err(Unwind::Error(error)) => Err(error),
      },
      FuncBody::Expression(expr) => match self.eval_expr(expr, &frame) {
        Ok(value) => Ok(value),
        Err(Unwind::Return(value)) => Ok(value),
        Err(Unwind::ShortCircuit) => Ok(Value::Undefined),
        Err(Unwind::Error(error)) => Err(error),
      },
    }
  }

  fn bind_parameters(&self, func: &Func, frame: &Env, args: &[Value]) -> Result<(), VmError> {
    for (i, param) in func.parameters.iter().enumerate() {
      let Pat::Id(id) = &*param.stx.pattern.stx else {
        return Err(VmError::UnsupportedPattern(param.stx.pattern.stx.kind_name()));
      };
      if param.stx.rest {
        let rest: Vec<Value> = args.get(i..).unwrap_or(&[]).to_vec();
        frame.declare(&id.stx.name, Value::Array(JsArray::new(rest)), true)?;
      } else {
        let value = args.get(i).cloned().unwrap_or(Value::Undefined);
        frame.declare(&id.stx.name, value, true)?;
      }
    }
    Ok(())
  }

  fn make_function(
    &self,
    name: Option<String>,
    func: &Node<Func>,
    env: &Env,
  ) -> Exec<Value> {
    if func.stx.async_ {
      return Err(VmError::AsyncUnsupported.into());
    }
    Ok(Value::Function(JsFunction::new(
      name,
      func.clone(),
      env.clone(),
    )))
  }

  // Spread in call-argument and array-literal position: arrays splice their elements, strings
  // splice their characters, anything else is not iterable.
  fn spread_into(&self, out: &mut Vec<Value>, value: Value) -> Result<(), VmError> {
    match value {
      Value::Array(array) => {
        out.extend(array.to_vec());
        Ok(())
      }
      Value::String(s) => {
        out.extend(s.chars().map(|c| Value::from(c.to_string())));
        Ok(())
      }
      other => Err(VmError::NotIterable(ops::to_string(&other))),
    }
  }
}

// Spread in object-literal position copies own enumerable entries; nullish spreads are no-ops and
// primitives contribute nothing (strings contribute their index-keyed characters).
fn spread_object_into(target: &crate::object::JsObject, value: &Value) {
  match value {
    Value::Object(source) => {
      for (key, value) in source.entries() {
        target.set(&key, value);
      }
    }
    Value::Array(array) => {
      for (index, element) in array.to_vec().into_iter().enumerate() {
        target.set(&index.to_string(), element);
      }
    }
    Value::String(s) => {
      for (index, c) in s.chars().enumerate() {
        target.set(&index.to_string(), Value::from(c.to_string()));
      }
    }
    _ => {}
  }
}

fn compound_base(operator: OperatorName) -> Option<OperatorName> {
  match operator {
    OperatorName::Assignment => None,
    OperatorName::AssignmentAddition => Some(OperatorName::Addition),
    OperatorName::AssignmentSubtraction => Some(OperatorName::Subtraction),
    OperatorName::AssignmentMultiplication => Some(OperatorName::Multiplication),
    OperatorName::AssignmentDivision => Some(OperatorName::Division),
    OperatorName::AssignmentRemainder => Some(OperatorName::Remainder),
    OperatorName::AssignmentExponentiation => Some(OperatorName::Exponentiation),
    OperatorName::AssignmentBitwiseAnd => Some(OperatorName::BitwiseAnd),
    OperatorName::AssignmentBitwiseOr => Some(OperatorName::BitwiseOr),
    OperatorName::AssignmentBitwiseXor => Some(OperatorName::BitwiseXor),
    OperatorName::AssignmentBitwiseLeftShift => Some(OperatorName::BitwiseLeftShift),
    OperatorName::AssignmentBitwiseRightShift => Some(OperatorName::BitwiseRightShift),
    other => unreachable!("{:?} is not an assignment operator", other),
  }
}

fn expr_kind_name(expr: &Expr) -> &'static str {
  match expr {
    Expr::Arrow(_) => "ArrowFunctionExpression",
    Expr::Binary(_) => "BinaryExpression",
    Expr::Call(_) => "CallExpression",
    Expr::Chain(_) => "ChainExpression",
    Expr::ComputedMember(_) | Expr::Member(_) => "MemberExpression",
    Expr::Cond(_) => "ConditionalExpression",
    Expr::Func(_) => "FunctionExpression",
    Expr::Id(_) => "Identifier",
    Expr::Unary(_) => "UnaryExpression",
    Expr::UnaryPostfix(_) => "UpdateExpression",
    Expr::LitArr(_) => "ArrayExpression",
    Expr::LitBool(_) | Expr::LitNull(_) | Expr::LitNum(_) | Expr::LitStr(_) => "Literal",
    Expr::LitObj(_) => "ObjectExpression",
    Expr::LitTemplate(_) => "TemplateLiteral",
  }
}

