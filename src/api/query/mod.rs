//! List and search parameters
//!
//! Structured [`QueryParams`] or raw query strings go in, [`NormalizedQuery`]
//! comes out, and list endpoints answer with a [`PaginatedResult`].

pub mod filters;
pub mod normalize;
pub mod params;
pub mod result;

pub use filters::FilterExpr;
pub use normalize::{normalize, FilterBody, NormalizedQuery};
pub use params::{QueryInput, QueryParams, Sort};
pub use result::{PaginatedResult, Paging};
