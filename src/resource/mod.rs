//! Resource abstraction shared by every managed collection.
//!
//! A resource type is a typed struct plus a static [`Schema`] describing its
//! wire fields, its optional attachment, and the routes of its collection.

mod draft;

pub use draft::*;

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::Routes;

/// A single item of a managed collection.
pub trait Resource:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Static description of this resource type.
    fn schema() -> &'static Schema;

    /// Server-assigned identifier.
    fn id(&self) -> &str;

    /// Current value of a scalar field, by wire name.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Persisted attachment reference, if the type has one and it is set.
    fn attachment(&self) -> Option<&str> {
        None
    }
}

/// Kind of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Date,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "an integer",
            FieldKind::Date => "a date (YYYY-MM-DD)",
        }
    }
}

/// Wire description of one scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Wire value sent when the field is unset
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required: false,
            default: None,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            required: false,
            default: None,
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Date,
            required: false,
            default: None,
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn or_default(self, value: &'static str) -> Self {
        Self {
            default: Some(value),
            ..self
        }
    }
}

/// Media accepted by an attachment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media {
    Image,
    Video,
}

impl Media {
    /// Whether an upload of the given content type fits this field.
    pub fn accepts(&self, content_type: &mime_guess::Mime) -> bool {
        match self {
            Media::Image => content_type.type_() == mime_guess::mime::IMAGE,
            Media::Video => content_type.type_() == mime_guess::mime::VIDEO,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Media::Image => "an image",
            Media::Video => "a video",
        }
    }
}

/// The single binary field of a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentSpec {
    pub name: &'static str,
    pub media: Media,
}

/// Static description of a resource type and its collection endpoint.
#[derive(Debug)]
pub struct Schema {
    /// Collection name, also used in messages
    pub collection: &'static str,
    /// Scalar fields in wire order
    pub fields: &'static [FieldSpec],
    pub attachment: Option<AttachmentSpec>,
    /// Key under which single-item responses may be wrapped
    pub envelope: Option<&'static str>,
    pub routes: Routes,
}

impl Schema {
    /// Look up a scalar field by wire name.
    pub fn field(&self, name: &str) -> Option<(usize, &'static FieldSpec)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.name == name)
    }
}

/// Value of one scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(Option<i64>),
    Date(Option<NaiveDate>),
}

impl FieldValue {
    /// The type-appropriate empty value.
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Integer => FieldValue::Integer(None),
            FieldKind::Date => FieldValue::Date(None),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Date(_) => FieldKind::Date,
        }
    }

    /// Whether the value counts as missing for a required field.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Integer(n) => n.is_none(),
            FieldValue::Date(d) => d.is_none(),
        }
    }

    /// Parse form input according to `kind`. Blank input is unset.
    pub fn parse(kind: FieldKind, raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        match kind {
            FieldKind::Text => Some(FieldValue::Text(raw.to_string())),
            FieldKind::Integer if trimmed.is_empty() => Some(FieldValue::Integer(None)),
            FieldKind::Integer => trimmed.parse().ok().map(|n| FieldValue::Integer(Some(n))),
            FieldKind::Date if trimmed.is_empty() => Some(FieldValue::Date(None)),
            FieldKind::Date => parse_date(trimmed).map(|d| FieldValue::Date(Some(d))),
        }
    }

    /// String form used in multipart parts.
    pub fn to_form_string(&self, spec: &FieldSpec) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(Some(n)) => n.to_string(),
            FieldValue::Date(Some(d)) => d.format("%Y-%m-%d").to_string(),
            FieldValue::Integer(None) | FieldValue::Date(None) => {
                spec.default.unwrap_or_default().to_string()
            }
        }
    }

    /// JSON form used in structured bodies.
    pub fn to_json(&self, spec: &FieldSpec) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Integer(Some(n)) => Value::from(*n),
            FieldValue::Date(Some(d)) => Value::String(d.format("%Y-%m-%d").to_string()),
            FieldValue::Integer(None) => spec
                .default
                .and_then(|d| d.parse::<i64>().ok())
                .map_or(Value::Null, Value::from),
            FieldValue::Date(None) => Value::Null,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(Some(n)) => write!(f, "{}", n),
            FieldValue::Date(Some(d)) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Integer(None) | FieldValue::Date(None) => Ok(()),
        }
    }
}

/// Accepts `YYYY-MM-DD` as well as full RFC 3339 timestamps, which the
/// backend returns for stored dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
