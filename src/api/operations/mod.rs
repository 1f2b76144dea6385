//! Entity operations on [`CventClient`](crate::api::CventClient)
//!
//! One `impl CventClient` block per resource family. Lookups come in two
//! flavours: must-exist lookups fail with `NotFound` when nothing matches,
//! optional lookups return an empty id instead.

pub mod admission_items;
pub mod attendees;
pub mod contacts;
pub mod events;
pub mod sessions;

use crate::api::error::{CventError, Result};
use crate::api::query::PaginatedResult;
use crate::entities::Identified;

/// Pass `page` through only if its first record has an id
pub(crate) fn require_match<T: Identified>(
    page: PaginatedResult<T>,
    what: impl FnOnce() -> String,
) -> Result<PaginatedResult<T>> {
    match page.first().and_then(Identified::id) {
        Some(_) => Ok(page),
        None => Err(CventError::NotFound(what())),
    }
}

/// Id of the first record, or `""` when there is none
pub(crate) fn first_id<T: Identified>(page: &PaginatedResult<T>) -> String {
    page.first()
        .and_then(Identified::id)
        .unwrap_or_default()
        .to_string()
}
