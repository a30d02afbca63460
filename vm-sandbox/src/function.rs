use crate::env::Env;
use crate::error::VmError;
use crate::value::Value;
use parse_sandbox::ast::func::Func;
use parse_sandbox::ast::node::Node;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::rc::Rc;

pub(crate) struct FunctionData {
  pub name: Option<Rc<str>>,
  pub func: Node<Func>,
  // The lexical frame at definition time. Invocation chains the body's frame off this one, which
  // is what makes closures over let/const bindings work.
  pub captured: Env,
}

/// A script-defined function value: parameter patterns, body, and the captured environment.
#[derive(Clone)]
pub struct JsFunction(Rc<FunctionData>);

impl JsFunction {
  pub(crate) fn new(name: Option<String>, func: Node<Func>, captured: Env) -> JsFunction {
    JsFunction(Rc::new(FunctionData {
      name: name.map(Rc::from),
      func,
      captured,
    }))
  }

  pub fn name(&self) -> Option<&str> {
    self.0.name.as_deref()
  }

  pub(crate) fn func(&self) -> &Node<Func> {
    &self.0.func
  }

  pub(crate) fn captured(&self) -> &Env {
    &self.0.captured
  }

  pub fn is_arrow(&self) -> bool {
    self.0.func.stx.arrow
  }

  pub fn ptr_eq(&self, other: &JsFunction) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl Debug for JsFunction {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "[function {}]", self.name().unwrap_or("anonymous"))
  }
}

/// The signature of a host-supplied callable: the receiver (for host-method calls through member
/// access) and the evaluated arguments.
pub type NativeFn = dyn Fn(Value, &[Value]) -> Result<Value, VmError>;

struct NativeFunctionData {
  name: Rc<str>,
  f: Box<NativeFn>,
}

/// A host-supplied callable exposed to scripts through the context dictionary (or a host object's
/// property).
#[derive(Clone)]
pub struct NativeFunction(Rc<NativeFunctionData>);

impl NativeFunction {
  pub fn new(
    name: impl AsRef<str>,
    f: impl Fn(Value, &[Value]) -> Result<Value, VmError> + 'static,
  ) -> NativeFunction {
    NativeFunction(Rc::new(NativeFunctionData {
      name: Rc::from(name.as_ref()),
      f: Box::new(f),
    }))
  }

  pub fn name(&self) -> &str {
    &self.0.name
  }

  pub fn call(&self, this: Value, args: &[Value]) -> Result<Value, VmError> {
    (self.0.f)(this, args)
  }

  pub fn ptr_eq(&self, other: &NativeFunction) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl Debug for NativeFunction {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "[native {}]", self.name())
  }
}
