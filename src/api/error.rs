//! Error types for the Cvent client
//!
//! `AuthError` covers the token exchange and is `Clone` so every caller waiting on
//! a shared refresh observes the same failure. `CventError` is what every public
//! operation returns.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of the client-credentials token exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Transport(String),

    #[error("token endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed token response: {0}")]
    Malformed(String),

    #[error("token response did not contain an access_token")]
    MissingAccessToken,

    #[error("token request timed out after {0:?}")]
    Timeout(Duration),

    #[error("token request cancelled")]
    Cancelled,
}

/// Structured error body returned by the API on non-success responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ErrorDetails>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub target: String,
}

/// One custom-field answer that could not be written during a full contact update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFieldFailure {
    pub field_id: String,
    pub status: Option<u16>,
    pub reason: String,
}

/// Errors returned by [`CventClient`](crate::api::CventClient) operations
#[derive(Debug, Error)]
pub enum CventError {
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),

    #[error("API request failed with status {status}: {body}")]
    Api {
        status: u16,
        error: Option<ErrorResponse>,
        body: String,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("contact {contact_id} updated, but {} custom field(s) failed: {}", .failures.len(), field_list(.failures))]
    PartialFailure {
        contact_id: String,
        failures: Vec<CustomFieldFailure>,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),
}

fn field_list(failures: &[CustomFieldFailure]) -> String {
    failures
        .iter()
        .map(|f| f.field_id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl CventError {
    /// Build an `Api` error from a status code and raw response body,
    /// keeping the structured body when it parses.
    pub fn api(status: u16, body: String) -> Self {
        let error = serde_json::from_str::<ErrorResponse>(&body).ok();
        Self::Api { status, error, body }
    }

    /// HTTP status attached to this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Authentication(AuthError::Status { status, .. }) => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Field ids that failed in a partial full-update; empty for every other error
    pub fn failed_field_ids(&self) -> Vec<&str> {
        match self {
            Self::PartialFailure { failures, .. } => {
                failures.iter().map(|f| f.field_id.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CventError>;
