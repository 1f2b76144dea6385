//! Admission items

use crate::api::client::CventClient;
use crate::api::constants::resources::ADMISSION_ITEMS;
use crate::api::error::Result;
use crate::api::query::{FilterExpr, PaginatedResult, QueryInput, QueryParams};
use crate::entities::AdmissionItem;

impl CventClient {
    /// Search admission items (`POST /ea/admission-items/filter`)
    pub async fn get_admission_items(
        &self,
        query: impl Into<QueryInput>,
    ) -> Result<PaginatedResult<AdmissionItem>> {
        self.search(ADMISSION_ITEMS, &query.into()).await
    }

    /// Admission items of one event; `filter`, `locale` and `sort` in `params` are not used
    pub async fn get_admission_items_by_event_id(
        &self,
        event_id: &str,
        params: QueryParams,
    ) -> Result<PaginatedResult<AdmissionItem>> {
        let scoped = QueryParams {
            filter: Some(FilterExpr::eq("event.id", event_id).into_string()),
            locale: None,
            sort: None,
            ..params
        };
        self.get_admission_items(scoped).await
    }
}
