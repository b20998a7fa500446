//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// User domain entity, as stored and as listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier, never reused
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ryan")]
    pub name: Option<String>,
    #[schema(example = 18)]
    pub age: Option<i64>,
}

impl User {
    pub fn new(id: i64, name: Option<String>, age: Option<i64>) -> Self {
        Self { id, name, age }
    }
}

/// The mutable fields of a user, as read from a request body.
///
/// Nothing is rejected: values that the columns cannot hold become `None`
/// (stored as NULL), the same way a dynamically typed SQL column would
/// coerce or drop them. Both columns are 64-bit integers in SQLite, so any
/// JSON integer that fits in an `i64` is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserFields {
    #[schema(example = "Ryan")]
    pub name: Option<String>,
    #[schema(example = 18)]
    pub age: Option<i64>,
}

impl UserFields {
    pub fn new(name: Option<String>, age: Option<i64>) -> Self {
        Self { name, age }
    }

    /// Pull `name` and `age` out of an arbitrary JSON body.
    pub fn from_body(body: &Value) -> Self {
        Self {
            name: body.get("name").and_then(text_value),
            age: body.get("age").and_then(integer_value),
        }
    }
}

/// Interpret a raw path segment as a user id.
///
/// A segment that is not an integer cannot match any row, so callers treat
/// `None` exactly like an id that was never inserted.
pub fn parse_user_id(raw: &str) -> Option<i64> {
    integer_str(raw)
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(bool_integer(*b).to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => integer_str(s),
        Value::Bool(b) => Some(bool_integer(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn integer_str(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(integral_f64))
}

/// Booleans are bound as 1 / 0, as SQLite has no boolean type.
fn bool_integer(b: bool) -> i64 {
    i64::from(b)
}

fn integral_f64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
