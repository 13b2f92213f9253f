//! Request body encoding for create and update.
//!
//! Types with an attachment field always go out as multipart forms: one text
//! part per scalar field, plus one file part only when a new upload is
//! pending. Clearing an attachment sends an empty text part under the
//! attachment name. Types without an attachment send a JSON object.

use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::errors::SubmitError;
use crate::resource::{Attachment, Draft, Resource, Upload};

/// Content of one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBody {
    Text(String),
    File(Upload),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: &'static str,
    pub body: PartBody,
}

/// Transport-independent description of a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Encode the scalar fields and attachment of a draft.
    pub fn from_draft<T: Resource>(draft: &Draft<T>) -> Self {
        let schema = T::schema();
        let Some(attachment) = schema.attachment else {
            let fields: Map<String, Value> = draft
                .values()
                .map(|(spec, value)| (spec.name.to_string(), value.to_json(spec)))
                .collect();
            return RequestBody::Json(Value::Object(fields));
        };

        let mut parts: Vec<FormPart> = draft
            .values()
            .map(|(spec, value)| FormPart {
                name: spec.name,
                body: PartBody::Text(value.to_form_string(spec)),
            })
            .collect();

        match draft.attachment() {
            Attachment::Replaced(upload) => parts.push(FormPart {
                name: attachment.name,
                body: PartBody::File(upload.clone()),
            }),
            Attachment::Cleared => parts.push(FormPart {
                name: attachment.name,
                body: PartBody::Text(String::new()),
            }),
            Attachment::None | Attachment::Existing(_) => {}
        }

        RequestBody::Multipart(parts)
    }

    /// Number of binary parts in the body.
    pub fn file_parts(&self) -> usize {
        match self {
            RequestBody::Json(_) => 0,
            RequestBody::Multipart(parts) => parts
                .iter()
                .filter(|p| matches!(p.body, PartBody::File(_)))
                .count(),
        }
    }

    pub(crate) fn encode(self) -> Result<Encoded, SubmitError> {
        match self {
            RequestBody::Json(value) => Ok(Encoded::Json(value)),
            RequestBody::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    form = match part.body {
                        PartBody::Text(text) => form.text(part.name, text),
                        PartBody::File(upload) => {
                            let file = Part::bytes(upload.bytes)
                                .file_name(upload.file_name)
                                .mime_str(upload.content_type.as_ref())
                                .map_err(|e| SubmitError::Encode(e.to_string()))?;
                            form.part(part.name, file)
                        }
                    };
                }
                Ok(Encoded::Form(form))
            }
        }
    }
}

/// Body ready to hand to reqwest.
pub(crate) enum Encoded {
    Json(Value),
    Form(Form),
}
