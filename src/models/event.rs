//! Event model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient_date;
use crate::api::Routes;
use crate::resource::{FieldSpec, FieldValue, Resource, Schema};

static EVENT_SCHEMA: Schema = Schema {
    collection: "events",
    fields: &[
        FieldSpec::text("title").required(),
        FieldSpec::text("location").required(),
        FieldSpec::date("date").required(),
        FieldSpec::text("description").required(),
    ],
    attachment: None,
    envelope: Some("event"),
    routes: Routes::plain("/events", "/events/{id}"),
};

/// An upcoming event. Events carry no attachment and are sent as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

impl Resource for Event {
    fn schema() -> &'static Schema {
        &EVENT_SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "title" => Some(FieldValue::Text(self.title.clone())),
            "location" => Some(FieldValue::Text(self.location.clone())),
            "date" => Some(FieldValue::Date(self.date)),
            "description" => Some(FieldValue::Text(self.description.clone())),
            _ => None,
        }
    }
}
