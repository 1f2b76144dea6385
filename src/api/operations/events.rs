//! Events and their registration types

use reqwest::Method;

use crate::api::client::{CventClient, RequestBody};
use crate::api::constants::{registration_types_path, resources::EVENTS};
use crate::api::error::Result;
use crate::api::query::{FilterExpr, PaginatedResult, QueryInput, QueryParams};
use crate::entities::{Event, RegistrationType};

impl CventClient {
    /// Search events (`POST /ea/events/filter`)
    pub async fn get_events(&self, query: impl Into<QueryInput>) -> Result<PaginatedResult<Event>> {
        self.search(EVENTS, &query.into()).await
    }

    pub async fn get_event_by_id(&self, event_id: &str) -> Result<PaginatedResult<Event>> {
        self.get_events(QueryParams::new().filter(FilterExpr::eq("id", event_id)))
            .await
    }

    /// List an event's registration types. Only `limit` and `token` are forwarded.
    pub async fn get_registration_types_by_event_id(
        &self,
        event_id: &str,
        params: QueryParams,
    ) -> Result<PaginatedResult<RegistrationType>> {
        let forwarded = QueryParams {
            limit: params.limit,
            token: params.token,
            ..QueryParams::default()
        };

        self.dispatch(
            Method::GET,
            &registration_types_path(event_id),
            &forwarded.into(),
            RequestBody::None,
        )
        .await
    }
}
