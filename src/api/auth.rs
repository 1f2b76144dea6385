//! OAuth2 client-credentials token lifecycle
//!
//! A [`TokenManager`] caches one bearer token per client and refreshes it when
//! it gets within ten minutes of expiry. Concurrent callers that find the cache
//! stale share a single in-flight exchange and all observe its outcome.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, info, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::constants::headers::CONTENT_TYPE_FORM;
use super::constants::TOKEN_PATH;
use super::deadline::bounded;
use super::error::AuthError;
use super::models::{CachedToken, OAuthScope};
use crate::auth::Credentials;

/// Source of the current time in epoch milliseconds
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

type PendingRefresh = Shared<BoxFuture<'static, Result<CachedToken, AuthError>>>;

#[derive(Default)]
struct TokenState {
    cached: Option<CachedToken>,
    pending: Option<PendingRefresh>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

/// Everything needed to perform one token exchange
pub(crate) struct TokenExchange {
    pub credentials: Credentials,
    pub token_url: String,
    pub http: reqwest::Client,
    pub clock: Arc<dyn Clock>,
    pub request_timeout: Duration,
    pub cancellation: CancellationToken,
    pub scopes: Vec<OAuthScope>,
}

impl TokenExchange {
    pub fn new(credentials: Credentials, base_url: &str, http: reqwest::Client) -> Self {
        Self {
            credentials,
            token_url: format!("{}{}", base_url.trim_end_matches('/'), TOKEN_PATH),
            http,
            clock: Arc::new(SystemClock),
            request_timeout: Duration::from_secs(30),
            cancellation: CancellationToken::new(),
            scopes: Vec::new(),
        }
    }

    fn request_url(&self) -> String {
        let mut url = format!(
            "{}?grant_type=client_credentials&client_id={}",
            self.token_url,
            self.credentials.client_id()
        );
        if !self.scopes.is_empty() {
            url.push_str("&scope=");
            url.push_str(&urlencoding::encode(&OAuthScope::join(&self.scopes)));
        }
        url
    }

    async fn request_token(&self) -> Result<CachedToken, AuthError> {
        debug!("Requesting access token from {}", self.token_url);

        let request = self
            .http
            .post(self.request_url())
            .header(AUTHORIZATION, format!("Basic {}", self.credentials.basic_auth()))
            .header(CONTENT_TYPE, CONTENT_TYPE_FORM);

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| AuthError::Transport(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| AuthError::Transport(e.to_string()))?;
            Ok::<_, AuthError>((status, body))
        };

        let (status, body) = bounded(exchange, self.request_timeout, &self.cancellation).await??;
        let issued_at = self.clock.now_millis();

        if !status.is_success() {
            warn!("Token request failed with status {}", status);
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Malformed(e.to_string()))?;
        let access_token = parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingAccessToken)?;
        let expires_in = parsed
            .expires_in
            .ok_or_else(|| AuthError::Malformed("missing expires_in".to_string()))?;

        info!("Obtained access token valid for {}s", expires_in);
        Ok(CachedToken::issued(access_token, issued_at, expires_in))
    }
}

/// Owns the credentials and the cached bearer token for one client
#[derive(Clone)]
pub struct TokenManager {
    exchange: Arc<TokenExchange>,
    state: Arc<Mutex<TokenState>>,
}

impl TokenManager {
    pub(crate) fn new(exchange: TokenExchange) -> Self {
        Self {
            exchange: Arc::new(exchange),
            state: Arc::new(Mutex::new(TokenState::default())),
        }
    }

    /// Return a valid bearer token, exchanging credentials only when the cached
    /// one is missing or within the safety padding of its expiry.
    pub async fn ensure_token(&self) -> Result<String, AuthError> {
        let pending = {
            let mut state = self.lock_state();
            let now = self.exchange.clock.now_millis();
            if let Some(token) = state.cached.as_ref().filter(|token| token.is_fresh_at(now)) {
                return Ok(token.value.clone());
            }

            match &state.pending {
                Some(pending) => {
                    debug!("Joining in-flight token refresh");
                    pending.clone()
                }
                None => {
                    let refresh = self.start_refresh();
                    state.pending = Some(refresh.clone());
                    refresh
                }
            }
        };

        pending.await.map(|token| token.value)
    }

    /// Drop the cached token so the next call performs a fresh exchange
    pub fn invalidate(&self) {
        self.lock_state().cached = None;
    }

    pub fn cached_token(&self) -> Option<CachedToken> {
        self.lock_state().cached.clone()
    }

    fn start_refresh(&self) -> PendingRefresh {
        let exchange = Arc::clone(&self.exchange);
        let state = Arc::clone(&self.state);

        async move {
            let outcome = exchange.request_token().await;
            {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                state.pending = None;
                if let Ok(token) = &outcome {
                    state.cached = Some(token.clone());
                }
            }
            outcome
        }
        .boxed()
        .shared()
    }

    fn lock_state(&self) -> MutexGuard<'_, TokenState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_url", &self.exchange.token_url)
            .field("credentials", &self.exchange.credentials)
            .field("cached", &self.cached_token())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::constants::TOKEN_SAFETY_PADDING_MILLIS;
    use crate::api::testing::{mount_token, test_credentials, token_body, ManualClock};
    use futures::future::join_all;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn manager(server: &MockServer, clock: Arc<ManualClock>) -> TokenManager {
        let mut exchange = TokenExchange::new(test_credentials(), &server.uri(), reqwest::Client::new());
        exchange.clock = clock;
        TokenManager::new(exchange)
    }

    #[tokio::test]
    async fn test_request_shape() {
        let server = MockServer::start().await;
        let basic = test_credentials().basic_auth();

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(query_param("grant_type", "client_credentials"))
            .and(query_param("client_id", "test-client"))
            .and(header("Authorization", format!("Basic {}", basic).as_str()))
            .and(header("Content-Type", CONTENT_TYPE_FORM))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok1", 3600)))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = manager(&server, ManualClock::at(0));
        assert_eq!(tokens.ensure_token().await.unwrap(), "tok1");
        assert_eq!(
            tokens.cached_token().unwrap().expires_at_epoch_millis,
            3_600_000
        );
    }

    #[tokio::test]
    async fn test_scopes_sent_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(query_param("scope", "event/sessions:read event/contacts:read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("scoped", 3600)))
            .expect(1)
            .mount(&server)
            .await;

        let mut exchange = TokenExchange::new(test_credentials(), &server.uri(), reqwest::Client::new());
        exchange.scopes = vec![OAuthScope::SessionsRead, OAuthScope::ContactsRead];
        let tokens = TokenManager::new(exchange);

        assert_eq!(tokens.ensure_token().await.unwrap(), "scoped");
    }

    #[tokio::test]
    async fn test_token_reused_within_window() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok1", 3600)))
            .expect(1)
            .mount(&server)
            .await;

        let clock = ManualClock::at(1_000);
        let tokens = manager(&server, clock.clone());

        assert_eq!(tokens.ensure_token().await.unwrap(), "tok1");
        clock.set(1_000 + 3_600_000 - TOKEN_SAFETY_PADDING_MILLIS - 1);
        assert_eq!(tokens.ensure_token().await.unwrap(), "tok1");
    }

    #[tokio::test]
    async fn test_padding_boundary_is_exclusive() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok1", 601)))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok2", 601)))
            .expect(1)
            .mount(&server)
            .await;

        // expires at 601_000, usable while now < 1_000
        let clock = ManualClock::at(0);
        let tokens = manager(&server, clock.clone());

        assert_eq!(tokens.ensure_token().await.unwrap(), "tok1");
        clock.set(999);
        assert_eq!(tokens.ensure_token().await.unwrap(), "tok1");
        clock.set(1_000);
        assert_eq!(tokens.ensure_token().await.unwrap(), "tok2");
    }

    #[tokio::test]
    async fn test_lifetime_within_padding_is_never_cached() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("short", 600)))
            .expect(2)
            .mount(&server)
            .await;

        let tokens = manager(&server, ManualClock::at(0));
        assert_eq!(tokens.ensure_token().await.unwrap(), "short");
        assert_eq!(tokens.ensure_token().await.unwrap(), "short");
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_exchange() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(token_body("tok1", 3600))
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tokens = manager(&server, ManualClock::at(0));
        let results = join_all((0..10).map(|_| tokens.ensure_token())).await;

        assert_eq!(results.len(), 10);
        for result in results {
            assert_eq!(result.unwrap(), "tok1");
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string("invalid_client")
                    .set_delay(Duration::from_millis(100)),
            )
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        mount_token(&server, "recovered", 3600).await;

        let tokens = manager(&server, ManualClock::at(0));
        let results = join_all((0..5).map(|_| tokens.ensure_token())).await;

        let expected = AuthError::Status {
            status: 401,
            body: "invalid_client".to_string(),
        };
        for result in results {
            assert_eq!(result.unwrap_err(), expected);
        }

        // the failed refresh is not sticky
        assert_eq!(tokens.ensure_token().await.unwrap(), "recovered");
    }

    #[tokio::test]
    async fn test_missing_access_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expires_in": 3600})))
            .mount(&server)
            .await;

        let tokens = manager(&server, ManualClock::at(0));
        assert_eq!(
            tokens.ensure_token().await.unwrap_err(),
            AuthError::MissingAccessToken
        );
        assert!(tokens.cached_token().is_none());
    }

    #[tokio::test]
    async fn test_missing_expires_in_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
            .mount(&server)
            .await;

        let tokens = manager(&server, ManualClock::at(0));
        assert!(matches!(
            tokens.ensure_token().await,
            Err(AuthError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let tokens = manager(&server, ManualClock::at(0));
        assert!(matches!(
            tokens.ensure_token().await,
            Err(AuthError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refresh() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok1", 3600)))
            .expect(2)
            .mount(&server)
            .await;

        let tokens = manager(&server, ManualClock::at(0));
        tokens.ensure_token().await.unwrap();
        tokens.invalidate();
        assert!(tokens.cached_token().is_none());
        tokens.ensure_token().await.unwrap();
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(token_body("slow", 3600))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let mut exchange = TokenExchange::new(test_credentials(), &server.uri(), reqwest::Client::new());
        exchange.request_timeout = Duration::from_millis(50);
        let tokens = TokenManager::new(exchange);

        assert_eq!(
            tokens.ensure_token().await.unwrap_err(),
            AuthError::Timeout(Duration::from_millis(50))
        );
    }

    #[tokio::test]
    async fn test_cancelled_before_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok1", 3600)))
            .expect(0)
            .mount(&server)
            .await;

        let exchange = TokenExchange::new(test_credentials(), &server.uri(), reqwest::Client::new());
        exchange.cancellation.cancel();
        let tokens = TokenManager::new(exchange);

        assert_eq!(tokens.ensure_token().await.unwrap_err(), AuthError::Cancelled);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let exchange = TokenExchange::new(
            test_credentials(),
            "https://api-platform-sandbox.cvent.com/",
            reqwest::Client::new(),
        );
        assert_eq!(
            exchange.token_url,
            "https://api-platform-sandbox.cvent.com/ea/oauth2/token"
        );
        let rendered = format!("{:?}", TokenManager::new(exchange));
        assert!(!rendered.contains("test-secret"));
    }
}
