//! Authenticated Cvent REST client
//!
//! [`CventClient`] is cheap to clone; clones share one HTTP connection pool and
//! one token cache. Every entity operation goes through `dispatch`:
//! obtain a token, normalize the query, send, and decode.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::auth::{Clock, TokenExchange, TokenManager};
use super::constants::headers::{CONTENT_TYPE_JSON, X_CORRELATION_ID};
use super::constants::{filter_path, resource_path};
use super::deadline::bounded;
use super::error::{CventError, Result};
use super::logging::ApiLogger;
use super::models::{CreationRecord, Region};
use super::query::{normalize, PaginatedResult, QueryInput};
use crate::auth::Credentials;
use crate::config::ClientConfig;

/// What a dispatched request carries as its body
#[derive(Debug, Clone)]
pub(crate) enum RequestBody {
    /// No body (path reads)
    None,
    /// The normalized filter body (search endpoints)
    Filter,
    Json(Value),
}

struct ClientInner {
    region: Region,
    base_url: String,
    http: reqwest::Client,
    tokens: TokenManager,
    logger: ApiLogger,
    request_timeout: Duration,
    cancellation: CancellationToken,
}

#[derive(Clone)]
pub struct CventClient {
    inner: Arc<ClientInner>,
}

impl CventClient {
    pub fn builder() -> CventClientBuilder {
        CventClientBuilder::new()
    }

    /// Client with default configuration for `region`
    pub fn new(credentials: Credentials, region: Region) -> Result<Self> {
        Self::builder().credentials(credentials).region(region).build()
    }

    /// Credentials from `CVENT_CLIENT_ID`/`CVENT_CLIENT_SECRET` and configuration
    /// from `CVENT_REGION`/`CVENT_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        let credentials = Credentials::from_env()?;
        Self::builder().credentials(credentials).config(config).build()
    }

    pub fn region(&self) -> Region {
        self.inner.region
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.inner.tokens
    }

    /// Make sure a valid bearer token is cached and return it
    pub async fn authenticate(&self) -> Result<String> {
        Ok(self.inner.tokens.ensure_token().await?)
    }

    /// Authenticate, send `method path{query}` with `body`, and decode the response.
    /// Empty response bodies decode as JSON `null`.
    pub(crate) async fn dispatch<R>(
        &self,
        method: Method,
        path: &str,
        query: &QueryInput,
        body: RequestBody,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let token = self.inner.tokens.ensure_token().await?;

        let normalized = normalize(query);
        let url = format!("{}{}{}", self.inner.base_url, path, normalized.query_string);
        let context = self.inner.logger.start_operation(method.as_str(), path);

        let mut request = self
            .inner
            .http
            .request(method, &url)
            .bearer_auth(&token)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(X_CORRELATION_ID, context.correlation_id.as_str());
        request = match body {
            RequestBody::None => request,
            RequestBody::Filter => request.json(&normalized.filter_body),
            RequestBody::Json(value) => request.json(&value),
        };

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let (status, text) = match bounded(exchange, self.inner.request_timeout, &self.inner.cancellation).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                self.inner.logger.log_failure(&context, &err.to_string());
                return Err(err.into());
            }
            Err(interrupted) => {
                let err = CventError::from(interrupted);
                self.inner.logger.log_failure(&context, &err.to_string());
                return Err(err);
            }
        };

        self.inner.logger.log_response(&context, status.as_u16());
        if !status.is_success() {
            return Err(CventError::api(status.as_u16(), text));
        }

        decode_body(&text)
    }

    /// `POST /ea/{resource}/filter` with the normalized filter body
    pub(crate) async fn search<T>(&self, resource: &str, query: &QueryInput) -> Result<PaginatedResult<T>>
    where
        T: DeserializeOwned,
    {
        self.dispatch(Method::POST, &filter_path(resource), query, RequestBody::Filter)
            .await
    }

    /// Create one record; returns its id, or `""` when the server reports none
    pub(crate) async fn create<E>(&self, resource: &str, entity: &E) -> Result<String>
    where
        E: Serialize,
    {
        let body = serde_json::to_value([entity])
            .map_err(|e| CventError::InvalidInput(format!("failed to serialize {}: {}", resource, e)))?;

        let records: Option<Vec<CreationRecord>> = self
            .dispatch(
                Method::POST,
                &resource_path(resource),
                &QueryInput::default(),
                RequestBody::Json(body),
            )
            .await?;

        let id = records
            .as_deref()
            .and_then(<[CreationRecord]>::first)
            .and_then(CreationRecord::id)
            .unwrap_or_default()
            .to_string();
        debug!("Created {} record {:?}", resource, id);
        Ok(id)
    }
}

fn decode_body<R: DeserializeOwned>(text: &str) -> Result<R> {
    let decoded = if text.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(text)
    };
    decoded.map_err(|e| CventError::Decode(e.to_string()))
}

impl fmt::Debug for CventClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CventClient")
            .field("region", &self.inner.region)
            .field("base_url", &self.inner.base_url)
            .field("tokens", &self.inner.tokens)
            .finish()
    }
}

/// Builder for CventClient
pub struct CventClientBuilder {
    credentials: Option<Credentials>,
    config: ClientConfig,
    region: Option<Region>,
    http_client: Option<reqwest::Client>,
    clock: Option<Arc<dyn Clock>>,
    cancellation: Option<CancellationToken>,
    base_url: Option<String>,
}

impl CventClientBuilder {
    pub fn new() -> Self {
        Self {
            credentials: None,
            config: ClientConfig::default(),
            region: None,
            http_client: None,
            clock: None,
            cancellation: None,
            base_url: None,
        }
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the region from the configuration
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Use a preconfigured HTTP client; connect timeout and user agent from the
    /// configuration are then not applied
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Cancelling `token` aborts every in-flight and future request of the client
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    #[cfg(test)]
    pub(crate) fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<CventClient> {
        let credentials = self
            .credentials
            .ok_or_else(|| CventError::Config("credentials are required".to_string()))?;
        self.config.validate()?;
        let region = self.region.unwrap_or(self.config.region);
        let base_url = self
            .base_url
            .unwrap_or_else(|| region.base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .pool_max_idle_per_host(10)
                .pool_idle_timeout(Duration::from_secs(90))
                .connect_timeout(self.config.connect_timeout())
                .user_agent(self.config.user_agent.as_str())
                .build()?,
        };

        let cancellation = self.cancellation.unwrap_or_default();
        let request_timeout = self.config.request_timeout();

        let mut exchange = TokenExchange::new(credentials, &base_url, http.clone());
        exchange.request_timeout = request_timeout;
        exchange.cancellation = cancellation.clone();
        exchange.scopes = self.config.scopes.clone();
        if let Some(clock) = self.clock {
            exchange.clock = clock;
        }

        debug!("Building Cvent client for region {} at {}", region, base_url);

        Ok(CventClient {
            inner: Arc::new(ClientInner {
                region,
                base_url,
                http,
                tokens: TokenManager::new(exchange),
                logger: ApiLogger::new(self.config.monitoring.clone()),
                request_timeout,
                cancellation,
            }),
        })
    }
}

impl Default for CventClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
