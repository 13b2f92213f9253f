//! Post model.

use serde::{Deserialize, Serialize};

use super::optional_reference;
use crate::api::Routes;
use crate::resource::{AttachmentSpec, FieldSpec, FieldValue, Media, Resource, Schema};

static POST_SCHEMA: Schema = Schema {
    collection: "post",
    fields: &[
        FieldSpec::text("title").required(),
        FieldSpec::text("description").required(),
    ],
    attachment: Some(AttachmentSpec {
        name: "image",
        media: Media::Image,
    }),
    envelope: Some("post"),
    routes: Routes::plain("/post", "/post/{id}"),
};

/// A news-feed post with an optional image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "optional_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

impl Resource for Post {
    fn schema() -> &'static Schema {
        &POST_SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "title" => Some(FieldValue::Text(self.title.clone())),
            "description" => Some(FieldValue::Text(self.description.clone())),
            _ => None,
        }
    }

    fn attachment(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
