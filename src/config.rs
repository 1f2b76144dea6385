//! Client configuration
//!
//! Loaded from code via [`ClientConfig::builder`], from TOML, or from the
//! environment (`CVENT_REGION`, `CVENT_REQUEST_TIMEOUT_SECS`).

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::api::error::{CventError, Result};
use crate::api::logging::{LogLevel, MonitoringConfig};
use crate::api::models::{OAuthScope, Region};

pub const REGION_VAR: &str = "CVENT_REGION";
pub const REQUEST_TIMEOUT_VAR: &str = "CVENT_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default, with = "region_name")]
    pub region: Region,
    /// `request_timeout_secs` in TOML; fractional seconds are allowed
    #[serde(
        rename = "request_timeout_secs",
        default = "default_request_timeout",
        with = "duration_secs"
    )]
    pub request_timeout: Duration,
    #[serde(
        rename = "connect_timeout_secs",
        default = "default_connect_timeout",
        with = "duration_secs"
    )]
    pub connect_timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Sent with the token request only when non-empty
    #[serde(default)]
    pub scopes: Vec<OAuthScope>,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    format!("cvent-client/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: Region::default(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
            scopes: Vec::new(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(content)
            .map_err(|e| CventError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| {
            CventError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults overridden by `CVENT_REGION` and `CVENT_REQUEST_TIMEOUT_SECS`,
    /// after loading a `.env` file from the working directory if one exists
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {:?}", path);
        }

        let mut config = Self::default();

        if let Ok(region) = std::env::var(REGION_VAR) {
            config.region = region.parse().map_err(CventError::Config)?;
        }
        if let Ok(timeout) = std::env::var(REQUEST_TIMEOUT_VAR) {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                CventError::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    REQUEST_TIMEOUT_VAR, timeout
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        info!("Using Cvent region {}", config.region);
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CventError::Config(format!("Failed to serialize config to TOML: {}", e)))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(CventError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(CventError::Config(
                "connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Region names in config files are matched case-insensitively
mod region_name {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::api::models::Region;

    pub fn serialize<S: Serializer>(region: &Region, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(region.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Region, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Timeouts as seconds in config files, kept to millisecond precision.
/// Whole seconds are written as integers.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if duration.subsec_nanos() == 0 {
            serializer.serialize_u64(duration.as_secs())
        } else {
            serializer.serialize_f64(duration.as_millis() as f64 / 1000.0)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "timeout must be a non-negative number of seconds, got {}",
                secs
            )));
        }
        Ok(Duration::from_millis((secs * 1000.0).round() as u64))
    }
}

/// Builder for ClientConfig
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn region(mut self, region: Region) -> Self {
        self.config.region = region;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn scopes(mut self, scopes: impl IntoIterator<Item = OAuthScope>) -> Self {
        self.config.scopes = scopes.into_iter().collect();
        self
    }

    pub fn monitoring_config(mut self, monitoring: MonitoringConfig) -> Self {
        self.config.monitoring = monitoring;
        self
    }

    /// Enable/disable request logging
    pub fn request_logging(mut self, enabled: bool) -> Self {
        self.config.monitoring.request_logging = enabled;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.monitoring.log_level = level;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
