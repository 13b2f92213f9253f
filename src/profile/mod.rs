//! Admin profile endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{decode_one, ApiClient};
use crate::errors::{FetchError, SubmitError};

pub const PROFILE_ROUTE: &str = "/admin/profile";

/// The signed-in administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
}

/// Profile change request. The password is only sent when set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn new(email: impl Into<String>, password: Option<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.filter(|p| !p.is_empty()),
        }
    }
}

impl ApiClient {
    /// `GET /admin/profile`.
    pub async fn fetch_profile(&self) -> Result<AdminProfile, FetchError> {
        let fetch = async {
            let url = self.url(PROFILE_ROUTE)?;
            let body = self.execute(self.request(Method::GET, url)).await?;
            decode_one::<AdminProfile>(&body, Some("admin"))
        };
        fetch.await.map_err(|source| {
            let err = FetchError {
                collection: "admin profile",
                source,
            };
            tracing::warn!("{}", err);
            err
        })
    }

    /// `PUT /admin/profile`.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<AdminProfile, SubmitError> {
        if update.email.is_empty() {
            return Err(SubmitError::Validation {
                missing: vec!["email"],
            });
        }

        let url = self.url(PROFILE_ROUTE)?;
        let request = self.request(Method::PUT, url).json(update);
        let body = self.execute(request).await.map_err(|e| {
            tracing::warn!("Failed to update admin profile: {}", e);
            e
        })?;
        let profile = decode_one::<AdminProfile>(&body, Some("admin"))?;
        tracing::info!("Updated admin profile for {}", profile.email);
        Ok(profile)
    }
}
