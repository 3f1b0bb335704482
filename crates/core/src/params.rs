//! Lenient parameter extraction from a `serde_json::Value` object.
//!
//! Every helper takes the params object, a key and a default. Missing keys and
//! wrongly typed values fall back to the default, so effect construction from
//! JSON never fails on a bad knob.

use serde_json::{json, Value};

/// Reads a finite `f64`. Integers are accepted; NaN and infinities are not.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Reads a non-negative integer as `usize`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Reads a non-negative integer as `u64`.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Reads a string.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Schema entry for a numeric parameter, in the shape every effect reports.
pub fn number_schema(default: f64, min: f64, max: f64, description: &str) -> Value {
    json!({
        "type": "number",
        "default": default,
        "min": min,
        "max": max,
        "description": description,
    })
}

/// Schema entry for an integer parameter.
pub fn integer_schema(default: u64, min: u64, max: u64, description: &str) -> Value {
    json!({
        "type": "integer",
        "default": default,
        "min": min,
        "max": max,
        "description": description,
    })
}

/// Schema entry for a string parameter restricted to a set of names.
pub fn choice_schema(default: &str, choices: &[&str], description: &str) -> Value {
    json!({
        "type": "string",
        "default": default,
        "choices": choices,
        "description": description,
    })
}
