//! Error handling module for the admin client.
//!
//! Every manager operation reports a typed failure; nothing is thrown past
//! the operation boundary. All `Display` output is meant to be shown to the
//! operator as-is.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a single HTTP exchange with the content API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS, or timeout failure before a response was read
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Server answered with a non-success status
    #[error("server responded {status}: {message}")]
    Status { status: StatusCode, message: String },
    /// Response body could not be understood
    #[error("malformed response: {0}")]
    Malformed(String),
    /// Route template could not be rendered against the base URL
    #[error("invalid route: {0}")]
    Route(String),
}

impl ApiError {
    /// Status code of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

/// Loading a collection failed.
#[derive(Debug, Error)]
#[error("failed to load {collection}: {source}")]
pub struct FetchError {
    pub collection: &'static str,
    #[source]
    pub source: ApiError,
}

/// A create or update was not accepted.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no draft is open")]
    NoDraft,
    /// Create was asked of an edit draft, or update of a create draft
    #[error("draft is open for {actual}, cannot submit as {expected}")]
    WrongMode {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<&'static str> },
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Server accepted the update but the local list has no such entry
    #[error("{collection} {id} was updated on the server but is not in the local list; reload it")]
    NotInList {
        collection: &'static str,
        id: String,
    },
}

/// A delete was not accepted. A 404 never produces this error.
#[derive(Debug, Error)]
#[error("failed to delete {id}: {source}")]
pub struct DeleteError {
    pub id: String,
    #[source]
    pub source: ApiError,
}

/// Rejected draft edit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("no draft is open")]
    NoDraft,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` expects {expected}")]
    KindMismatch {
        field: &'static str,
        expected: &'static str,
    },
    #[error("invalid value for `{field}`: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Invalid configuration in the environment or on the command line.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL in {var}: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("invalid value in {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Error body shapes returned by the content API.
///
/// The backend reports failures as either `{"message": ...}` or
/// `{"error": ...}`; `message` wins when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extract a human-readable message from a raw error body.
    pub fn message_from(body: &[u8]) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Build a status error, falling back to the reason phrase when the body
/// carries no message.
pub fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = ErrorBody::message_from(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    });
    ApiError::Status { status, message }
}
