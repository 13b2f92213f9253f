//! Match model.

use serde::{Deserialize, Serialize};

use super::optional_reference;
use crate::api::Routes;
use crate::resource::{AttachmentSpec, FieldSpec, FieldValue, Media, Resource, Schema};

static MATCH_SCHEMA: Schema = Schema {
    collection: "matches",
    fields: &[
        FieldSpec::text("title").required(),
        FieldSpec::text("description").required(),
    ],
    attachment: Some(AttachmentSpec {
        name: "video",
        media: Media::Video,
    }),
    envelope: Some("match"),
    routes: Routes {
        list: "/matches",
        create: "/matches/create",
        update: "/matches/update/{id}",
        delete: "/matches/delete/{id}",
    },
};

/// A recorded bout with an optional video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
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
    pub video: Option<String>,
}

impl Resource for Match {
    fn schema() -> &'static Schema {
        &MATCH_SCHEMA
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
        self.video.as_deref()
    }
}
