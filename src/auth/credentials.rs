use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::info;

use crate::api::error::{CventError, Result};

pub const CLIENT_ID_VAR: &str = "CVENT_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CVENT_CLIENT_SECRET";

/// OAuth client credentials; immutable once a client is built
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn from_env() -> Result<Credentials> {
        info!("Importing Cvent credentials from environment variables");

        let client_id = std::env::var(CLIENT_ID_VAR).map_err(|_| {
            CventError::Config(format!("{} environment variable not set", CLIENT_ID_VAR))
        })?;
        let client_secret = std::env::var(CLIENT_SECRET_VAR).map_err(|_| {
            CventError::Config(format!("{} environment variable not set", CLIENT_SECRET_VAR))
        })?;

        Ok(Credentials::new(client_id, client_secret))
    }

    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Credentials> {
        let path = path.as_ref();
        info!("Importing Cvent credentials from .env file: {}", path.display());

        if !path.exists() {
            return Err(CventError::Config(format!(
                "Environment file not found: {}",
                path.display()
            )));
        }

        // Read the file directly so values in it win over the process environment
        let mut client_id = None;
        let mut client_secret = None;
        let entries = dotenvy::from_path_iter(path).map_err(|e| {
            CventError::Config(format!("Failed to load .env file '{}': {}", path.display(), e))
        })?;
        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                CventError::Config(format!("Failed to parse .env file '{}': {}", path.display(), e))
            })?;
            match key.as_str() {
                CLIENT_ID_VAR => client_id = Some(value),
                CLIENT_SECRET_VAR => client_secret = Some(value),
                _ => {}
            }
        }

        let client_id = client_id.ok_or_else(|| {
            CventError::Config(format!("{} not found in .env file: {}", CLIENT_ID_VAR, path.display()))
        })?;
        let client_secret = client_secret.ok_or_else(|| {
            CventError::Config(format!(
                "{} not found in .env file: {}",
                CLIENT_SECRET_VAR,
                path.display()
            ))
        })?;

        Ok(Credentials::new(client_id, client_secret))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `base64(client_id:client_secret)` for the Basic authorization header
    pub fn basic_auth(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
