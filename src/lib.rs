//! RBF Admin
//!
//! Client library for managing the boxing federation site's content
//! (posts, matches, boxers, events, news) through its REST API.
//!
//! Each collection is handled by a [`ResourceManager`] that loads the list,
//! owns a single edit draft, submits creates and updates (multipart when the
//! type carries an attachment), and keeps the local list in step with what
//! the server confirmed.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod manager;
pub mod models;
pub mod profile;
pub mod resource;

pub use api::{ApiClient, Routes};
pub use auth::{Anonymous, CredentialProvider, StaticToken};
pub use config::Config;
pub use errors::{ApiError, ConfigError, DeleteError, DraftError, FetchError, SubmitError};
pub use manager::{ConfirmedDelete, LoadState, PendingDelete, ResourceManager};
pub use models::{Boxer, Event, Match, News, Post, SocialMedia};
pub use profile::{AdminProfile, ProfileUpdate};
pub use resource::{
    Attachment, Draft, DraftMode, FieldInput, FieldKind, FieldSpec, FieldValue, Resource, Schema,
    Upload,
};

#[cfg(test)]
mod tests;
