//! Structured logging with correlation tracking for Cvent API operations
//!
//! Each request gets a correlation id that is sent as a header and repeated in
//! every log line for that request. Authorization headers are never logged.

use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Monitoring and logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub request_logging: bool,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            request_logging: true,
            log_level: LogLevel::Info,
        }
    }
}

impl MonitoringConfig {
    /// No request logging at all
    pub fn disabled() -> Self {
        Self {
            request_logging: false,
            log_level: LogLevel::Error,
        }
    }
}

/// Structured logger for API operations
#[derive(Debug, Clone)]
pub struct ApiLogger {
    config: MonitoringConfig,
}

/// Context for a single request
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub correlation_id: String,
    pub method: String,
    pub path: String,
    pub start_time: Instant,
}

impl ApiLogger {
    pub fn new(config: MonitoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonitoringConfig {
        &self.config
    }

    /// Start tracking a request
    pub fn start_operation(&self, method: &str, path: &str) -> OperationContext {
        let context = OperationContext {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            method: method.to_string(),
            path: path.to_string(),
            start_time: Instant::now(),
        };

        if self.enabled(LogLevel::Debug) {
            let log_data = json!({
                "event": "http_request",
                "correlation_id": context.correlation_id,
                "method": context.method,
                "path": context.path,
                "timestamp": chrono::Utc::now().to_rfc3339()
            });

            debug!("HTTP Request: {}", log_data);
        }

        context
    }

    /// Log the outcome of a request that received a response
    pub fn log_response(&self, context: &OperationContext, status_code: u16) {
        let duration = context.start_time.elapsed();
        let level = if status_code >= 400 { LogLevel::Warn } else { LogLevel::Info };
        if !self.enabled(level) {
            return;
        }

        let log_data = json!({
            "event": "http_response",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "path": context.path,
            "status_code": status_code,
            "duration_ms": duration.as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if status_code >= 400 {
            warn!("HTTP Response (Error): {}", log_data);
        } else {
            info!("HTTP Response: {}", log_data);
        }
    }

    /// Log a request that never produced a response
    pub fn log_failure(&self, context: &OperationContext, error_message: &str) {
        if !self.enabled(LogLevel::Error) {
            return;
        }

        let log_data = json!({
            "event": "http_failure",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "path": context.path,
            "duration_ms": context.start_time.elapsed().as_millis(),
            "error": error_message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        error!("HTTP Failure: {}", log_data);
    }

    fn enabled(&self, level: LogLevel) -> bool {
        self.config.request_logging && level <= self.config.log_level
    }
}

impl OperationContext {
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}
