//! HTTP client for the content API.
//!
//! One client is shared by every resource manager. It owns the base URLs,
//! the credential provider and the timeout; it holds no resource state.

mod body;
mod routes;

pub use body::*;
pub use routes::*;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{authorization_header, Anonymous, CredentialProvider, StaticToken};
use crate::config::Config;
use crate::errors::{status_error, ApiError, SubmitError};
use crate::resource::Resource;

/// Content API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_url: Url,
    asset_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_url", &self.api_url.as_str())
            .field("asset_url", &self.asset_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: &Config,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            asset_url: config.asset_url.clone(),
            credentials,
        })
    }

    /// Client using the configured token, if any.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let credentials: Arc<dyn CredentialProvider> = match &config.api_token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(Anonymous),
        };
        Self::new(config, credentials)
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Resolve a stored attachment reference against the asset origin.
    /// Absolute URLs are returned as-is.
    pub fn resolve_asset(&self, reference: &str) -> Option<Url> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if let Ok(absolute) = Url::parse(reference) {
            return Some(absolute);
        }
        self.asset_url
            .join(reference.trim_start_matches('/'))
            .ok()
    }

    /// `GET` the collection.
    pub async fn list<T: Resource>(&self, routes: &Routes) -> Result<Vec<T>, ApiError> {
        let url = render(&self.api_url, routes.list, None)?;
        let body = self.execute(self.request(Method::GET, url)).await?;
        decode_list(&body)
    }

    /// `POST` a new item.
    pub async fn create<T: Resource>(
        &self,
        routes: &Routes,
        body: RequestBody,
    ) -> Result<T, SubmitError> {
        let url = render(&self.api_url, routes.create, None)?;
        let request = with_body(self.request(Method::POST, url), body.encode()?);
        let body = self.execute(request).await?;
        Ok(decode_one(&body, T::schema().envelope)?)
    }

    /// `PUT` changes to an existing item.
    pub async fn update<T: Resource>(
        &self,
        routes: &Routes,
        id: &str,
        body: RequestBody,
    ) -> Result<T, SubmitError> {
        let url = render(&self.api_url, routes.update, Some(id))?;
        let request = with_body(self.request(Method::PUT, url), body.encode()?);
        let body = self.execute(request).await?;
        Ok(decode_one(&body, T::schema().envelope)?)
    }

    /// `DELETE` an item. The response body is ignored.
    pub async fn delete(&self, routes: &Routes, id: &str) -> Result<(), ApiError> {
        let url = render(&self.api_url, routes.delete, Some(id))?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    /// Start a request with credentials attached.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match authorization_header(self.credentials.as_ref()) {
            Some((name, value)) => builder.header(name, value),
            None => builder,
        }
    }

    pub(crate) fn url(&self, template: &str) -> Result<Url, ApiError> {
        render(&self.api_url, template, None)
    }

    /// Send a request and return the body of a successful response.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = status_error(status, &body);
            tracing::debug!("Request failed: {}", err);
            return Err(err);
        }

        Ok(body.to_vec())
    }
}

fn with_body(builder: RequestBuilder, body: Encoded) -> RequestBuilder {
    match body {
        Encoded::Json(value) => builder.json(&value),
        Encoded::Form(form) => builder.multipart(form),
    }
}

/// Decode a collection response (a JSON array).
pub fn decode_list<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a single-item response that may be wrapped under `envelope`.
pub fn decode_one<T: DeserializeOwned>(
    body: &[u8],
    envelope: Option<&str>,
) -> Result<T, ApiError> {
    let mut value: Value = serde_json::from_slice(body)?;
    if let Some(key) = envelope {
        let inner = value.get_mut(key).map(Value::take);
        if let Some(inner) = inner {
            value = inner;
        }
    }
    Ok(serde_json::from_value(value)?)
}
