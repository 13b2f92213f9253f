//! Credential injection.
//!
//! The client never reads session storage itself; whoever owns the session
//! hands a provider to the API client at construction.

use std::fmt;

use reqwest::header::{HeaderValue, AUTHORIZATION};

/// Supplies the bearer credential attached to every API request.
pub trait CredentialProvider: Send + Sync {
    /// Current token, or `None` to send the request unauthenticated.
    fn bearer_token(&self) -> Option<String>;
}

/// Sends no credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct Anonymous;

impl CredentialProvider for Anonymous {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, typically from configuration.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Build the `Authorization` header value for a provider, if any.
///
/// Tokens that are not valid header values are dropped with a warning.
pub fn authorization_header(
    provider: &dyn CredentialProvider,
) -> Option<(reqwest::header::HeaderName, HeaderValue)> {
    let token = provider.bearer_token()?;
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    match HeaderValue::from_str(&format!("Bearer {}", token)) {
        Ok(mut value) => {
            value.set_sensitive(true);
            Some((AUTHORIZATION, value))
        }
        Err(_) => {
            tracing::warn!("Ignoring bearer token that is not a valid header value");
            None
        }
    }
}
