//! Lenient field decoders for server payloads
//!
//! Server payloads are loosely typed: ids arrive as strings or numbers, lists
//! contain the odd malformed element, numbers sometimes come quoted. These
//! helpers are used with `#[serde(default, deserialize_with = "...")]` so a
//! bad field falls back to its default instead of failing the whole payload.
//!
//! Each helper first buffers the field as a [`serde_json::Value`], which
//! always succeeds for JSON input, then tries the typed decode.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode `T`, or `None` when the value is null or of the wrong shape.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    Ok(T::deserialize(raw).ok())
}

/// Decode a list, dropping elements that do not fit `T`.
///
/// A non-array value decodes as an empty list.
pub fn vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(list_of(Value::deserialize(deserializer)?))
}

/// Like [`vec`], but keeps "list was absent" distinct from "list was empty".
pub fn option_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_array() {
        Ok(Some(list_of(raw)))
    } else {
        Ok(None)
    }
}

/// Decode an object of named records, dropping entries that do not fit `T`.
pub fn map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(name, raw)| match T::deserialize(raw) {
            Ok(value) => Some((name, value)),
            Err(e) => {
                tracing::debug!(entry = %name, error = %e, "Dropping malformed map entry");
                None
            }
        })
        .collect())
}

/// A number, accepting numeric strings such as `"12.5"`.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(&Value::deserialize(deserializer)?))
}

/// A non-negative count. Fractions are truncated.
pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(&Value::deserialize(deserializer)?)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.min(f64::from(u32::MAX)) as u32))
}

/// A piece of text, accepting numbers and booleans rendered as text.
///
/// Blank strings decode as `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from(&Value::deserialize(deserializer)?))
}

/// A list of ids. Elements may be strings, numbers or `{ "id": ... }` objects.
pub fn ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .filter_map(|item| match item {
            Value::Object(fields) => fields
                .get("id")
                .or_else(|| fields.get("entityId"))
                .and_then(text_from),
            other => text_from(other),
        })
        .collect())
}

fn list_of<T: DeserializeOwned>(raw: Value) -> Vec<T> {
    let Value::Array(items) = raw else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "Dropping malformed list element");
                None
            }
        })
        .collect()
}

fn number_from(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn text_from(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
