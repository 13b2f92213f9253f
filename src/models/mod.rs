//! Data models for the federation site content.
//!
//! These models match the backend's JSON documents (`_id` identifiers,
//! camelCase fields) and declare how each collection is addressed.

mod boxer;
mod event;
mod matches;
mod news;
mod post;

pub use boxer::*;
pub use event::*;
pub use matches::*;
pub use news::*;
pub use post::*;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::resource::parse_date;

/// Accepts a number, a numeric string, or null (as 0).
///
/// Counts come back as strings when the backend stored raw form values.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid count {}", n))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid count {:?}", s))),
        other => Err(serde::de::Error::custom(format!("invalid count {}", other))),
    }
}

/// Accepts a string, a number, or null (as empty).
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected text, got {}", other))),
    }
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or null.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_date(s.trim())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date {:?}", s))),
    }
}

/// Attachment references: empty strings mean "no attachment".
pub(crate) fn optional_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}
