//! News model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{lenient_date, optional_reference};
use crate::api::Routes;
use crate::resource::{AttachmentSpec, FieldSpec, FieldValue, Media, Resource, Schema};

static NEWS_SCHEMA: Schema = Schema {
    collection: "news",
    fields: &[
        FieldSpec::text("title").required(),
        FieldSpec::text("description").required(),
        FieldSpec::date("date").required(),
    ],
    attachment: Some(AttachmentSpec {
        name: "video",
        media: Media::Video,
    }),
    envelope: Some("news"),
    routes: Routes {
        list: "/news",
        create: "/news",
        update: "/news/update/{id}",
        delete: "/news/delete/{id}",
    },
};

/// A dated news entry with an optional video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "optional_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub video: Option<String>,
}

impl Resource for News {
    fn schema() -> &'static Schema {
        &NEWS_SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "title" => Some(FieldValue::Text(self.title.clone())),
            "description" => Some(FieldValue::Text(self.description.clone())),
            "date" => Some(FieldValue::Date(self.date)),
            _ => None,
        }
    }

    fn attachment(&self) -> Option<&str> {
        self.video.as_deref()
    }
}
