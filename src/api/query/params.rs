//! Query parameter inputs
//!
//! Callers describe list/search parameters either as a structured
//! [`QueryParams`] or as a raw, already-encoded query string. Both shapes are
//! carried by [`QueryInput`] and only ever resolved by the normalizer.

use std::fmt;

use super::filters::FilterExpr;
use super::result::PaginatedResult;

/// Sort expressions accepted by list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sort {
    StartAsc,
    StartDesc,
    Custom(String),
}

impl Sort {
    pub fn as_str(&self) -> &str {
        match self {
            Sort::StartAsc => "start:ASC",
            Sort::StartDesc => "start:DESC",
            Sort::Custom(value) => value,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured list/search parameters; every key is optional and independent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub after: Option<String>,
    pub before: Option<String>,
    pub filter: Option<String>,
    pub locale: Option<String>,
    pub limit: Option<u32>,
    pub sort: Option<Sort>,
    pub token: Option<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<FilterExpr>) -> Self {
        self.filter = Some(filter.into().into_string());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Parameters for the page after `page`, or `None` on the last page.
    /// Everything except the pagination token is carried over.
    pub fn continue_from<T>(&self, page: &PaginatedResult<T>) -> Option<Self> {
        page.next_token().map(|next| Self {
            token: Some(next.to_string()),
            ..self.clone()
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Either parameter shape accepted by list and search operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    Structured(QueryParams),
    Raw(String),
}

impl Default for QueryInput {
    fn default() -> Self {
        QueryInput::Structured(QueryParams::default())
    }
}

impl From<QueryParams> for QueryInput {
    fn from(params: QueryParams) -> Self {
        QueryInput::Structured(params)
    }
}

impl From<&str> for QueryInput {
    fn from(raw: &str) -> Self {
        QueryInput::Raw(raw.to_string())
    }
}

impl From<String> for QueryInput {
    fn from(raw: String) -> Self {
        QueryInput::Raw(raw)
    }
}

impl From<Option<QueryParams>> for QueryInput {
    fn from(params: Option<QueryParams>) -> Self {
        QueryInput::Structured(params.unwrap_or_default())
    }
}
