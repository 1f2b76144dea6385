//! Cvent REST API client
//!
//! Token lifecycle, query normalization, request dispatch and the entity
//! operations built on top of them.

pub mod auth;
pub mod client;
pub mod constants;
pub mod deadline;
pub mod error;
pub mod logging;
pub mod models;
pub mod operations;
pub mod query;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{Clock, SystemClock, TokenManager};
pub use client::{CventClient, CventClientBuilder};
pub use error::{AuthError, CustomFieldFailure, CventError, ErrorDetails, ErrorResponse, Result};
pub use logging::{ApiLogger, LogLevel, MonitoringConfig, OperationContext};
pub use models::{CachedToken, CreationRecord, OAuthScope, Region};
pub use query::{
    normalize, FilterBody, FilterExpr, NormalizedQuery, PaginatedResult, Paging, QueryInput, QueryParams, Sort,
};
