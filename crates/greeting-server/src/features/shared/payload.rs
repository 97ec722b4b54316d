//! Loosely typed request bodies
//!
//! The echo and simulate endpoints accept arbitrary JSON objects and pull a
//! couple of fields out with per-field defaults. The rules:
//!
//! - an empty body is treated as `{}`
//! - a body that is not a JSON object is rejected
//! - `null` counts as an absent field
//! - string fields take strings verbatim and render any other value as JSON
//! - integer fields take JSON integers or strings holding one
//!
//! # Examples
//!
//! ```rust,ignore
//! let body = parse_object(br#"{"scenario": "slow", "delay": "250"}"#)?;
//! let scenario = string_field(&body, "scenario").unwrap_or_else(|| "normal".into());
//! let delay = int_field(&body, "delay")?.unwrap_or(0);
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

pub type JsonObject = Map<String, Value>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Field '{field}' must be an integer, got {value}")]
    NotAnInteger { field: String, value: String },
}

/// Parse a request body into a JSON object
pub fn parse_object(body: &[u8]) -> Result<JsonObject, PayloadError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonObject::new());
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| PayloadError::InvalidJson(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(PayloadError::NotAnObject),
    }
}

/// Read `key` as display text
pub fn string_field(body: &JsonObject, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Read `key` as a signed integer
pub fn int_field(body: &JsonObject, key: &str) -> Result<Option<i64>, PayloadError> {
    let value = match body.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    };

    parsed.map(Some).ok_or_else(|| PayloadError::NotAnInteger {
        field: key.to_string(),
        value: value.to_string(),
    })
}
