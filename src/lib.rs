//! Authenticated client for the Cvent event-management REST API.
//!
//! ```no_run
//! use cvent_client::{Credentials, CventClient, QueryParams, Region};
//!
//! # async fn run() -> cvent_client::Result<()> {
//! let client = CventClient::new(Credentials::new("client-id", "client-secret"), Region::Sandbox)?;
//! let events = client.get_events(QueryParams::new().limit(10)).await?;
//! for event in &events.data {
//!     println!("{:?}", event.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod entities;

pub use api::{
    AuthError, CventClient, CventClientBuilder, CventError, FilterExpr, OAuthScope, PaginatedResult, QueryInput,
    QueryParams, Region, Result, Sort,
};
pub use auth::Credentials;
pub use config::{ClientConfig, ClientConfigBuilder};
