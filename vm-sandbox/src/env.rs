use crate::error::VmError;
use crate::value::Value;
use ahash::HashMap;
use std::cell::RefCell;
use std::rc::Rc;

struct Binding {
  value: Value,
  writable: bool,
}

struct Frame {
  bindings: RefCell<HashMap<String, Binding>>,
  parent: Option<Env>,
}

/// A lexical scope frame in the environment chain.
///
/// Frames are reference-shared: function values capture the frame they were defined in, which
/// keeps the whole chain above it alive for as long as the function value exists.
#[derive(Clone)]
pub struct Env(Rc<Frame>);

impl Env {
  /// Creates a root frame with no parent.
  pub fn new() -> Env {
    Env(Rc::new(Frame {
      bindings: RefCell::new(HashMap::default()),
      parent: None,
    }))
  }

  /// Creates a child frame whose lookups fall through to this frame.
  pub fn child(&self) -> Env {
    Env(Rc::new(Frame {
      bindings: RefCell::new(HashMap::default()),
      parent: Some(self.clone()),
    }))
  }

  /// Resolves a name against the nearest frame owning it.
  pub fn lookup(&self, name: &str) -> Option<Value> {
    let mut current = Some(self);
    while let Some(env) = current {
      if let Some(binding) = env.0.bindings.borrow().get(name) {
        return Some(binding.value.clone());
      }
      current = env.0.parent.as_ref();
    }
    None
  }

  /// Whether any frame on the chain owns the name.
  pub fn has_any(&self, name: &str) -> bool {
    let mut current = Some(self);
    while let Some(env) = current {
      if env.0.bindings.borrow().contains_key(name) {
        return true;
      }
      current = env.0.parent.as_ref();
    }
    false
  }

  /// Whether this frame itself owns the name.
  pub fn owns(&self, name: &str) -> bool {
    self.0.bindings.borrow().contains_key(name)
  }

  /// Creates a binding in this frame. Only this frame is scanned for a conflict; shadowing an
  /// outer binding of the same name is allowed.
  pub fn declare(&self, name: &str, value: Value, writable: bool) -> Result<(), VmError> {
    let mut bindings = self.0.bindings.borrow_mut();
    if bindings.contains_key(name) {
      return Err(VmError::AlreadyDeclared(name.to_string()));
    }
    bindings.insert(name.to_string(), Binding { value, writable });
    Ok(())
  }

  /// Mutates the nearest binding of the name. Fails fast if the owning cell is immutable or no
  /// frame owns the name.
  pub fn assign(&self, name: &str, value: Value) -> Result<(), VmError> {
    self.redefine_owner_cell(name, value)
  }

  /// Locates the owning frame and replaces the cell's value, preserving the cell's writability
  /// flag. A `const` cell therefore rejects compound assignments and increments the same way it
  /// rejects plain assignment.
  pub fn redefine_owner_cell(&self, name: &str, value: Value) -> Result<(), VmError> {
    let mut current = Some(self);
    while let Some(env) = current {
      let mut bindings = env.0.bindings.borrow_mut();
      if let Some(binding) = bindings.get_mut(name) {
        if !binding.writable {
          return Err(VmError::CannotRedefine(name.to_string()));
        }
        binding.value = value;
        return Ok(());
      }
      drop(bindings);
      current = env.0.parent.as_ref();
    }
    Err(VmError::UnknownBinding(name.to_string()))
  }
}

impl Default for Env {
  fn default() -> Env {
    Env::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn nearest_frame_shadows_outer() {
    let outer = Env::new();
    outer.declare("x", Value::Number(1.0), true).unwrap();
    let inner = outer.child();
    inner.declare("x", Value::Number(2.0), true).unwrap();
    assert_eq!(inner.lookup("x"), Some(Value::Number(2.0)));
    assert_eq!(outer.lookup("x"), Some(Value::Number(1.0)));
  }

  #[test]
  fn assignment_mutates_owning_frame() {
    let outer = Env::new();
    outer.declare("x", Value::Number(1.0), true).unwrap();
    let inner = outer.child();
    inner.assign("x", Value::Number(5.0)).unwrap();
    assert_eq!(outer.lookup("x"), Some(Value::Number(5.0)));
  }

  #[test]
  fn declare_conflicts_only_within_a_frame() {
    let env = Env::new();
    env.declare("x", Value::Null, true).unwrap();
    assert_eq!(
      env.declare("x", Value::Null, true),
      Err(VmError::AlreadyDeclared("x".to_string()))
    );
    assert!(env.child().declare("x", Value::Null, true).is_ok());
  }

  #[test]
  fn immutable_cells_reject_redefinition() {
    let env = Env::new();
    env.declare("k", Value::Number(1.0), false).unwrap();
    assert_eq!(
      env.redefine_owner_cell("k", Value::Number(2.0)),
      Err(VmError::CannotRedefine("k".to_string()))
    );
    assert_eq!(
      env.assign("missing", Value::Null),
      Err(VmError::UnknownBinding("missing".to_string()))
    );
  }
}
