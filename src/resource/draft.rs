//! Edit drafts.
//!
//! A draft is a detached copy of a resource's fields. Editing it never
//! touches the list entry it was copied from.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use mime_guess::Mime;

use super::{FieldValue, Resource, Schema};
use crate::errors::DraftError;

/// Whether a draft will be submitted as a create or an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Edit { id: String },
}

impl DraftMode {
    pub fn describe(&self) -> &'static str {
        match self {
            DraftMode::Create => "create",
            DraftMode::Edit { .. } => "update",
        }
    }
}

/// A file picked by the user and not yet uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Mime,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content_type: Mime, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Guess the content type from the file name.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name).first_or_octet_stream();
        Self::new(file_name, content_type, bytes)
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        Ok(Self::new(file_name, content_type, bytes))
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type.essence_str())
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Attachment slot of a draft.
///
/// `Cleared` is sent as an empty text part under the attachment name so the
/// backend can tell "remove it" apart from "leave it as is".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Nothing attached and nothing to change
    None,
    /// Already persisted; left unchanged on submit
    Existing(String),
    /// New file to upload, replacing whatever was there
    Replaced(Upload),
    /// Persisted attachment to be removed
    Cleared,
}

impl Attachment {
    pub fn upload(&self) -> Option<&Upload> {
        match self {
            Attachment::Replaced(upload) => Some(upload),
            _ => None,
        }
    }
}

/// Input for a single draft field.
#[derive(Debug, Clone)]
pub enum FieldInput {
    /// A typed value; must match the field's kind
    Value(FieldValue),
    /// Form text, parsed according to the field's kind
    Raw(String),
    /// File for the attachment field
    Upload(Upload),
    /// Reset the field (or remove the attachment)
    Clear,
}

impl From<FieldValue> for FieldInput {
    fn from(value: FieldValue) -> Self {
        FieldInput::Value(value)
    }
}

impl From<Upload> for FieldInput {
    fn from(upload: Upload) -> Self {
        FieldInput::Upload(upload)
    }
}

impl From<&str> for FieldInput {
    fn from(raw: &str) -> Self {
        FieldInput::Raw(raw.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(raw: String) -> Self {
        FieldInput::Raw(raw)
    }
}

/// An in-progress, unsaved copy of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<T> {
    mode: DraftMode,
    /// Parallel to `T::schema().fields`
    values: Vec<FieldValue>,
    attachment: Attachment,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> Draft<T> {
    /// Empty draft for a create form.
    pub fn empty() -> Self {
        let values = T::schema()
            .fields
            .iter()
            .map(|spec| FieldValue::empty(spec.kind))
            .collect();
        Self {
            mode: DraftMode::Create,
            values,
            attachment: Attachment::None,
            _resource: PhantomData,
        }
    }

    /// Field-level copy of an existing resource.
    pub fn from_resource(item: &T) -> Self {
        let values = T::schema()
            .fields
            .iter()
            .map(|spec| {
                item.field(spec.name)
                    .filter(|v| v.kind() == spec.kind)
                    .unwrap_or_else(|| FieldValue::empty(spec.kind))
            })
            .collect();
        let attachment = match item.attachment() {
            Some(reference) if !reference.is_empty() => {
                Attachment::Existing(reference.to_string())
            }
            _ => Attachment::None,
        };
        Self {
            mode: DraftMode::Edit {
                id: item.id().to_string(),
            },
            values,
            attachment,
            _resource: PhantomData,
        }
    }

    pub fn schema(&self) -> &'static Schema {
        T::schema()
    }

    pub fn mode(&self) -> &DraftMode {
        &self.mode
    }

    /// Identifier of the resource under edit; `None` for a create draft.
    pub fn id(&self) -> Option<&str> {
        match &self.mode {
            DraftMode::Edit { id } => Some(id),
            DraftMode::Create => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        let (index, _) = T::schema().field(name)?;
        self.values.get(index)
    }

    /// Scalar fields in wire order.
    pub fn values(&self) -> impl Iterator<Item = (&'static super::FieldSpec, &FieldValue)> {
        T::schema().fields.iter().zip(self.values.iter())
    }

    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    /// Update one field.
    pub fn set(&mut self, name: &str, input: impl Into<FieldInput>) -> Result<(), DraftError> {
        let input = input.into();
        let schema = T::schema();

        if let Some(spec) = schema.attachment.filter(|a| a.name == name) {
            self.attachment = match input {
                FieldInput::Upload(upload) => {
                    if !spec.media.accepts(&upload.content_type) {
                        return Err(DraftError::InvalidValue {
                            field: spec.name,
                            value: upload.content_type.to_string(),
                        });
                    }
                    Attachment::Replaced(upload)
                }
                FieldInput::Clear => match self.mode {
                    DraftMode::Create => Attachment::None,
                    DraftMode::Edit { .. } => Attachment::Cleared,
                },
                FieldInput::Value(_) | FieldInput::Raw(_) => {
                    return Err(DraftError::KindMismatch {
                        field: spec.name,
                        expected: spec.media.describe(),
                    })
                }
            };
            return Ok(());
        }

        let (index, spec) = schema
            .field(name)
            .ok_or_else(|| DraftError::UnknownField(name.to_string()))?;

        let value = match input {
            FieldInput::Value(value) if value.kind() == spec.kind => value,
            FieldInput::Raw(raw) => FieldValue::parse(spec.kind, &raw).ok_or(
                DraftError::InvalidValue {
                    field: spec.name,
                    value: raw,
                },
            )?,
            FieldInput::Clear => FieldValue::empty(spec.kind),
            FieldInput::Value(_) | FieldInput::Upload(_) => {
                return Err(DraftError::KindMismatch {
                    field: spec.name,
                    expected: spec.kind.describe(),
                })
            }
        };
        self.values[index] = value;
        Ok(())
    }

    /// Required fields that are still empty, in wire order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.values()
            .filter(|(spec, value)| spec.required && value.is_empty())
            .map(|(spec, _)| spec.name)
            .collect()
    }
}
