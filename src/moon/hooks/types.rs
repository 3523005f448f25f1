//! Scalar codecs
//!
//! Field values are stored as raw text in the tree. Turning that text into a [`Value`] (and
//! back) goes through the registered [`TypeHook`]s first, in registration order, and falls back
//! to the built-in rules below when none of them matches.
//!
//! Resolution (text -> value):
//!
//!     1. Non-empty ASCII digits, optionally after a `-`: integer if it fits a `u64` or an
//!        `i64`, otherwise the text itself as a string so no digit is lost.
//!     2. Anything `f64` accepts that is finite: float.
//!     3. `true` / `false`: boolean.
//!     4. `null`: null.
//!     5. Otherwise the text itself as a string.
//!
//! Representation (value -> text): booleans and null as their keywords, numbers in their
//! `serde_json` textual form (floats keep a fraction or exponent), strings verbatim. Arrays and
//! objects have no scalar form.

use crate::moon::value::{Number, Value};

/// A user supplied scalar codec. `None` means "not mine", letting the next hook try.
pub trait TypeHook: Send + Sync {
    fn name(&self) -> &str;

    fn resolve(&self, text: &str) -> Option<Value>;

    fn represent(&self, value: &Value) -> Option<String>;
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

pub fn resolve_builtin(text: &str) -> Value {
    if is_integer_literal(text) {
        if let Ok(int) = text.parse::<u64>() {
            return Value::Number(int.into());
        }
        if let Ok(int) = text.parse::<i64>() {
            return Value::Number(int.into());
        }
        return Value::String(text.to_string());
    }

    if let Some(float) = text.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(float);
    }

    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => Value::String(text.to_string()),
    }
}

pub fn represent_builtin(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("true".to_string()),
        Value::Bool(false) => Some("false".to_string()),
        Value::Null => Some("null".to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
