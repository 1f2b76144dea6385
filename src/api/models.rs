use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::TOKEN_SAFETY_PADDING_MILLIS;

/// Regional API deployments; one is selected per client and never changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    #[serde(rename = "na", alias = "north-america", alias = "NA")]
    NorthAmerica,
    #[serde(rename = "eu", alias = "europe", alias = "EU")]
    Europe,
    #[serde(rename = "sandbox", alias = "SANDBOX")]
    Sandbox,
}

impl Region {
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "https://api-platform.cvent.com",
            Region::Europe => "https://api-platform-eur.cvent.com",
            Region::Sandbox => "https://api-platform-sandbox.cvent.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "na",
            Region::Europe => "eu",
            Region::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "na" | "north-america" | "production" => Ok(Region::NorthAmerica),
            "eu" | "europe" => Ok(Region::Europe),
            "sandbox" => Ok(Region::Sandbox),
            other => Err(format!("unknown region '{}', expected one of: na, eu, sandbox", other)),
        }
    }
}

/// OAuth scopes the platform grants for event data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuthScope {
    #[serde(rename = "event/attendees:write")]
    AttendeesWrite,
    #[serde(rename = "event/attendees:read")]
    AttendeesRead,
    #[serde(rename = "event/contacts:write")]
    ContactsWrite,
    #[serde(rename = "event/contacts:read")]
    ContactsRead,
    #[serde(rename = "event/session-enrollment:write")]
    SessionEnrollmentWrite,
    #[serde(rename = "event/session-enrollment:read")]
    SessionEnrollmentRead,
    #[serde(rename = "event/session-enrollment:delete")]
    SessionEnrollmentDelete,
    #[serde(rename = "event/sessions:write")]
    SessionsWrite,
    #[serde(rename = "event/sessions:read")]
    SessionsRead,
    #[serde(rename = "event/sessions:delete")]
    SessionsDelete,
}

impl OAuthScope {
    pub const ALL: [OAuthScope; 10] = [
        OAuthScope::AttendeesWrite,
        OAuthScope::AttendeesRead,
        OAuthScope::ContactsWrite,
        OAuthScope::ContactsRead,
        OAuthScope::SessionEnrollmentWrite,
        OAuthScope::SessionEnrollmentRead,
        OAuthScope::SessionEnrollmentDelete,
        OAuthScope::SessionsWrite,
        OAuthScope::SessionsRead,
        OAuthScope::SessionsDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthScope::AttendeesWrite => "event/attendees:write",
            OAuthScope::AttendeesRead => "event/attendees:read",
            OAuthScope::ContactsWrite => "event/contacts:write",
            OAuthScope::ContactsRead => "event/contacts:read",
            OAuthScope::SessionEnrollmentWrite => "event/session-enrollment:write",
            OAuthScope::SessionEnrollmentRead => "event/session-enrollment:read",
            OAuthScope::SessionEnrollmentDelete => "event/session-enrollment:delete",
            OAuthScope::SessionsWrite => "event/sessions:write",
            OAuthScope::SessionsRead => "event/sessions:read",
            OAuthScope::SessionsDelete => "event/sessions:delete",
        }
    }

    /// Space-delimited scope parameter value
    pub fn join(scopes: &[OAuthScope]) -> String {
        scopes.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(" ")
    }
}

/// Cached bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    /// Issue time plus the server-reported lifetime, in epoch milliseconds
    pub expires_at_epoch_millis: i64,
}

impl CachedToken {
    pub fn issued(value: String, issued_at_millis: i64, expires_in_secs: i64) -> Self {
        Self {
            value,
            expires_at_epoch_millis: issued_at_millis.saturating_add(expires_in_secs.saturating_mul(1000)),
        }
    }

    /// Usable only strictly before expiry minus the safety padding
    pub fn is_fresh_at(&self, now_millis: i64) -> bool {
        now_millis < self.expires_at_epoch_millis - TOKEN_SAFETY_PADDING_MILLIS
    }
}

impl fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedToken")
            .field("value", &"<redacted>")
            .field("expires_at_epoch_millis", &self.expires_at_epoch_millis)
            .finish()
    }
}

/// One entry of the array returned by create endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreationRecord {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl CreationRecord {
    /// Id of the created record; absent and empty ids both yield `None`
    pub fn id(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get("id"))
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty())
    }
}
