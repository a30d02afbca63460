use crate::value::Value;
use std::cell::Ref;
use std::cell::RefCell;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::rc::Rc;

/// A reference-shared array of values.
#[derive(Clone, Default)]
pub struct JsArray(Rc<RefCell<Vec<Value>>>);

impl JsArray {
  pub fn new(elements: Vec<Value>) -> JsArray {
    JsArray(Rc::new(RefCell::new(elements)))
  }

  pub fn len(&self) -> usize {
    self.0.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.borrow().is_empty()
  }

  pub fn get(&self, index: usize) -> Option<Value> {
    self.0.borrow().get(index).cloned()
  }

  /// Writes `index`, extending the array with `undefined` holes as needed.
  pub fn set(&self, index: usize, value: Value) {
    let mut elements = self.0.borrow_mut();
    if index >= elements.len() {
      elements.resize(index + 1, Value::Undefined);
    }
    elements[index] = value;
  }

  pub fn push(&self, value: Value) {
    self.0.borrow_mut().push(value);
  }

  /// Deleting an element leaves an `undefined` hole at its index.
  pub fn delete(&self, index: usize) {
    let mut elements = self.0.borrow_mut();
    if index < elements.len() {
      elements[index] = Value::Undefined;
    }
  }

  /// Truncates or extends (with `undefined`) to the given length.
  pub fn set_len(&self, len: usize) {
    self.0.borrow_mut().resize(len, Value::Undefined);
  }

  pub fn to_vec(&self) -> Vec<Value> {
    self.0.borrow().clone()
  }

  pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
    self.0.borrow()
  }

  pub fn ptr_eq(&self, other: &JsArray) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl FromIterator<Value> for JsArray {
  fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> JsArray {
    JsArray::new(iter.into_iter().collect())
  }
}

impl PartialEq for JsArray {
  fn eq(&self, other: &Self) -> bool {
    self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
  }
}

impl Debug for JsArray {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.0.borrow().iter()).finish()
  }
}

struct Property {
  key: Rc<str>,
  value: Value,
}

struct ObjectData {
  // The host-provided inheritance parent. Reads fall through to it; writes never do.
  proto: Option<JsObject>,
  // Insertion-ordered own properties with linear key lookup; key counts in sandboxed scripts are
  // small enough that a map would cost more than it saves, and enumeration order falls out for
  // free.
  properties: RefCell<Vec<Property>>,
}

/// A reference-shared string-keyed object with stable insertion order and an optional
/// host-provided inheritance parent.
#[derive(Clone)]
pub struct JsObject(Rc<ObjectData>);

impl JsObject {
  pub fn new() -> JsObject {
    JsObject(Rc::new(ObjectData {
      proto: None,
      properties: RefCell::new(Vec::new()),
    }))
  }

  /// Creates an object whose missing keys are looked up on `proto` (and its ancestors).
  pub fn with_proto(proto: JsObject) -> JsObject {
    JsObject(Rc::new(ObjectData {
      proto: Some(proto),
      properties: RefCell::new(Vec::new()),
    }))
  }

  pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> JsObject {
    let object = JsObject::new();
    for (key, value) in entries {
      object.set(&key, value);
    }
    object
  }

  pub fn proto(&self) -> Option<&JsObject> {
    self.0.proto.as_ref()
  }

  /// Reads an own property, without consulting the inheritance chain.
  pub fn get_own(&self, key: &str) -> Option<Value> {
    self
      .0
      .properties
      .borrow()
      .iter()
      .find(|p| &*p.key == key)
      .map(|p| p.value.clone())
  }

  /// Reads a property: own keys first, then each inheritance ancestor in order.
  pub fn get(&self, key: &str) -> Option<Value> {
    if let Some(value) = self.get_own(key) {
      return Some(value);
    }
    self.0.proto.as_ref().and_then(|proto| proto.get(key))
  }

  pub fn has(&self, key: &str) -> bool {
    self.get_own(key).is_some() || self.0.proto.as_ref().is_some_and(|proto| proto.has(key))
  }

  /// Creates or overwrites the own key on this object. Writes never travel up the inheritance
  /// chain; a shadowing own key is created instead.
  pub fn set(&self, key: &str, value: Value) {
    let mut properties = self.0.properties.borrow_mut();
    match properties.iter_mut().find(|p| &*p.key == key) {
      Some(existing) => existing.value = value,
      None => properties.push(Property {
        key: Rc::from(key),
        value,
      }),
    }
  }

  /// Removes an own key. Returns true whether or not the key was present.
  pub fn delete(&self, key: &str) -> bool {
    let mut properties = self.0.properties.borrow_mut();
    if let Some(idx) = properties.iter().position(|p| &*p.key == key) {
      properties.remove(idx);
    }
    true
  }

  /// Own keys in insertion order.
  pub fn keys(&self) -> Vec<Rc<str>> {
    self
      .0
      .properties
      .borrow()
      .iter()
      .map(|p| p.key.clone())
      .collect()
  }

  /// Own entries in insertion order.
  pub fn entries(&self) -> Vec<(Rc<str>, Value)> {
    self
      .0
      .properties
      .borrow()
      .iter()
      .map(|p| (p.key.clone(), p.value.clone()))
      .collect()
  }

  pub fn len(&self) -> usize {
    self.0.properties.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.properties.borrow().is_empty()
  }

  pub fn ptr_eq(&self, other: &JsObject) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl Default for JsObject {
  fn default() -> JsObject {
    JsObject::new()
  }
}

impl PartialEq for JsObject {
  fn eq(&self, other: &Self) -> bool {
    if self.ptr_eq(other) {
      return true;
    }
    let a = self.entries();
    let b = other.entries();
    a.len() == b.len()
      && a
        .iter()
        .zip(b.iter())
        .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
  }
}

impl Debug for JsObject {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let mut map = f.debug_map();
    for p in self.0.properties.borrow().iter() {
      map.entry(&&*p.key, &p.value);
    }
    map.finish()
  }
}

/// Parses a property key as an array index: a canonical base-10 integer with no leading zeros
/// (except "0" itself).
pub(crate) fn array_index(key: &str) -> Option<usize> {
  if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
    return None;
  }
  if !key.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  key.parse::<usize>().ok()
}
