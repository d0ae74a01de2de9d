//! Typed reads of individual keys from a settings object.
//!
//! A key that is absent, `null` or of the wrong JSON type yields the
//! caller's default, so a hand-edited settings file with one bad entry still
//! loads. Range checks belong to `Settings::validate`.

use serde_json::Value;

/// Reads a number; integers are widened to `f64`.
pub fn setting_f64(obj: &Value, key: &str, default: f64) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads a non-negative integer. Negative and fractional numbers fall back.
pub fn setting_u64(obj: &Value, key: &str, default: u64) -> u64 {
    obj.get(key).and_then(Value::as_u64).unwrap_or(default)
}

pub fn setting_usize(obj: &Value, key: &str, default: usize) -> usize {
    obj.get(key)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

pub fn setting_string(obj: &Value, key: &str, default: &str) -> String {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) => s.to_owned(),
        None => default.to_owned(),
    }
}
