// conductor/src/core/value.rs

//! Step data is plain `serde_json::Value`.
//!
//! A step receives an [`Args`] list and produces one [`Value`]. Anything a step
//! wants to hand to its successor as "several values" must be packed into a
//! single array (or object), which the next step unpacks itself.

pub use serde_json::Value;

/// Positional argument list of one handler invocation.
pub type Args = Vec<Value>;

/// Truthiness used by conditional checks.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy. Everything else, including
/// empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

pub(crate) fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
