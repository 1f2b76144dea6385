//! Sessions

use crate::api::client::CventClient;
use crate::api::constants::resources::SESSIONS;
use crate::api::error::Result;
use crate::api::query::{FilterExpr, PaginatedResult, QueryInput, QueryParams};
use crate::entities::Session;

impl CventClient {
    /// Search sessions (`POST /ea/sessions/filter`)
    pub async fn get_sessions(&self, query: impl Into<QueryInput>) -> Result<PaginatedResult<Session>> {
        self.search(SESSIONS, &query.into()).await
    }

    /// Sessions of one event; any `filter` or `sort` in `params` is replaced
    pub async fn get_sessions_by_event_id(
        &self,
        event_id: &str,
        params: QueryParams,
    ) -> Result<PaginatedResult<Session>> {
        let scoped = QueryParams {
            filter: Some(FilterExpr::eq("event.id", event_id).into_string()),
            sort: None,
            ..params
        };
        self.get_sessions(scoped).await
    }
}
