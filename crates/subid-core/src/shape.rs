//! Structural shape checks over untyped JSON.
//!
//! These answer "is this an object carrying these keys?" and nothing more.
//! Attribute value types are checked by the callers in [`crate::classify`].

use serde_json::{Map, Value};

/// `true` iff `value` is an object that directly holds every key in `names`.
///
/// A key present with a `null` value counts as present. Arrays, primitives
/// and `null` never pass, even for an empty `names` list.
pub fn has_attributes(value: &Value, names: &[&str]) -> bool {
  value
    .as_object()
    .is_some_and(|object| missing_attribute(object, names).is_none())
}

/// The first name in `names` that `object` lacks.
pub fn missing_attribute<'a>(
  object: &Map<String, Value>,
  names: &[&'a str],
) -> Option<&'a str> {
  names
    .iter()
    .copied()
    .find(|name| !object.contains_key(*name))
}

/// The string held by `object[name]`, if the key exists and holds a string.
pub fn string_attribute<'v>(
  object: &'v Map<String, Value>,
  name: &str,
) -> Option<&'v str> {
  object.get(name).and_then(Value::as_str)
}
