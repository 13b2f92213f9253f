//! Boxer profile model.

use serde::{Deserialize, Serialize};

use super::{lenient_count, lenient_text, optional_reference};
use crate::api::Routes;
use crate::resource::{AttachmentSpec, FieldSpec, FieldValue, Media, Resource, Schema};

static BOXER_SCHEMA: Schema = Schema {
    collection: "boxers",
    fields: &[
        FieldSpec::text("name").required(),
        FieldSpec::text("description").required(),
        FieldSpec::integer("winningMatches").or_default("0"),
        FieldSpec::integer("lostMatches").or_default("0"),
        FieldSpec::integer("draw").or_default("0"),
        FieldSpec::text("kaos"),
        FieldSpec::text("instagram"),
        FieldSpec::text("facebook"),
        FieldSpec::text("twitter"),
    ],
    attachment: Some(AttachmentSpec {
        name: "photo",
        media: Media::Image,
    }),
    envelope: Some("boxer"),
    routes: Routes {
        list: "/boxers",
        create: "/boxers",
        update: "/boxers/update/{id}",
        delete: "/boxers/{id}",
    },
};

/// Social links. Stored nested, submitted as top-level form fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default, deserialize_with = "lenient_text")]
    pub instagram: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub facebook: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub twitter: String,
}

/// A boxer's public profile and record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boxer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "optional_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub winning_matches: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub lost_matches: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub draw: i64,
    /// Knockouts
    #[serde(default, deserialize_with = "lenient_text")]
    pub kaos: String,
    #[serde(default)]
    pub social_media: SocialMedia,
}

impl Resource for Boxer {
    fn schema() -> &'static Schema {
        &BOXER_SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "name" => FieldValue::Text(self.name.clone()),
            "description" => FieldValue::Text(self.description.clone()),
            "winningMatches" => FieldValue::Integer(Some(self.winning_matches)),
            "lostMatches" => FieldValue::Integer(Some(self.lost_matches)),
            "draw" => FieldValue::Integer(Some(self.draw)),
            "kaos" => FieldValue::Text(self.kaos.clone()),
            "instagram" => FieldValue::Text(self.social_media.instagram.clone()),
            "facebook" => FieldValue::Text(self.social_media.facebook.clone()),
            "twitter" => FieldValue::Text(self.social_media.twitter.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn attachment(&self) -> Option<&str> {
        self.photo.as_deref()
    }
}
