//! Shared fixtures for the in-crate wiremock tests

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::auth::Clock;
use super::client::CventClient;
use super::constants::TOKEN_PATH;
use super::logging::LogLevel;
use crate::auth::Credentials;
use crate::config::ClientConfig;

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn at(now_millis: i64) -> Arc<Self> {
        Arc::new(Self {
            now: AtomicI64::new(now_millis),
        })
    }

    pub fn set(&self, now_millis: i64) {
        self.now.store(now_millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub fn test_credentials() -> Credentials {
    Credentials::new("test-client", "test-secret")
}

pub fn token_body(token: &str, expires_in: i64) -> serde_json::Value {
    json!({
        "access_token": token,
        "expires_in": expires_in,
        "token_type": "Bearer"
    })
}

/// Token endpoint that always answers with `token`
pub async fn mount_token(server: &MockServer, token: &str, expires_in: i64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(token, expires_in)))
        .mount(server)
        .await;
}

/// Route `log` output through the test harness (`RUST_LOG=debug` to see it)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> CventClient {
    init_logging();
    CventClient::builder()
        .credentials(test_credentials())
        .config(ClientConfig::builder().log_level(LogLevel::Debug).build())
        .base_url(server.uri())
        .build()
        .expect("test client should build")
}
