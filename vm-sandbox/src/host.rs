//! Host-side plumbing: the context dictionary seeding the top-level frame, and conversions
//! between `serde_json` data and script values.

use crate::env::Env;
use crate::error::VmError;
use crate::object::JsArray;
use crate::object::JsObject;
use crate::value::Value;

/// The dictionary of host bindings seeding a program's top-level frame.
///
/// Entries are walked shallowly: each top-level name becomes a binding whose value is shared by
/// reference, so scripts mutate host arrays/objects in place and the host observes it.
pub type Context = ahash::HashMap<String, Value>;

pub(crate) fn seed_env(env: &Env, context: &Context) -> Result<(), VmError> {
  for (name, value) in context {
    env.declare(name, value.clone(), true)?;
  }
  Ok(())
}

impl Value {
  /// Converts host JSON data into a script value. Arrays and objects become fresh reference-shared
  /// values; object key order follows the JSON document.
  pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
      serde_json::Value::Null => Value::Null,
      serde_json::Value::Bool(b) => Value::Bool(*b),
      serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
      serde_json::Value::String(s) => Value::string(s),
      serde_json::Value::Array(elements) => {
        Value::Array(elements.iter().map(Value::from_json).collect::<JsArray>())
      }
      serde_json::Value::Object(entries) => {
        let object = JsObject::new();
        for (key, value) in entries {
          object.set(key, Value::from_json(value));
        }
        Value::Object(object)
      }
    }
  }

  /// Converts a script value back to JSON. `undefined` and non-finite numbers map to `null` (as
  /// JSON serialization does in the reference language); functions have no JSON form and return
  /// `None`.
  pub fn to_json(&self) -> Option<serde_json::Value> {
    match self {
      Value::Undefined | Value::Null => Some(serde_json::Value::Null),
      Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
      Value::Number(n) => Some(
        serde_json::Number::from_f64(*n)
          .map(serde_json::Value::Number)
          .unwrap_or(serde_json::Value::Null),
      ),
      Value::String(s) => Some(serde_json::Value::String(s.to_string())),
      Value::Array(array) => {
        let mut out = Vec::with_capacity(array.len());
        for element in array.to_vec() {
          out.push(element.to_json().unwrap_or(serde_json::Value::Null));
        }
        Some(serde_json::Value::Array(out))
      }
      Value::Object(object) => {
        let mut out = serde_json::Map::new();
        for (key, value) in object.entries() {
          out.insert(
            key.to_string(),
            value.to_json().unwrap_or(serde_json::Value::Null),
          );
        }
        Some(serde_json::Value::Object(out))
      }
      Value::Function(_) | Value::Native(_) => None,
    }
  }
}

impl From<&serde_json::Value> for Value {
  fn from(json: &serde_json::Value) -> Value {
    Value::from_json(json)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn json_round_trip_preserves_structure_and_key_order() {
    let json = json!({"b": [1, "two", null], "a": {"nested": true}});
    let value = Value::from_json(&json);
    assert_eq!(value.to_json(), Some(json));
  }

  #[test]
  fn undefined_and_nan_become_null() {
    assert_eq!(Value::Undefined.to_json(), Some(serde_json::Value::Null));
    assert_eq!(
      Value::Number(f64::NAN).to_json(),
      Some(serde_json::Value::Null)
    );
  }
}
