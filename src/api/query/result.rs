//! Paginated list responses
//!
//! Every list and search endpoint answers with the same envelope:
//! `{paging: {limit, totalCount, currentToken, nextToken?, _links}, data: [...]}`.
//! Pagination is caller driven; `next_token` is never followed automatically.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub current_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(rename = "_links", default, skip_serializing_if = "Value::is_null")]
    pub links: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    #[serde(default)]
    pub paging: Paging,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for PaginatedResult<T> {
    fn default() -> Self {
        Self {
            paging: Paging::default(),
            data: Vec::new(),
        }
    }
}

impl<T> PaginatedResult<T> {
    /// Token for the next page, if the server reported one
    pub fn next_token(&self) -> Option<&str> {
        self.paging.next_token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn has_more(&self) -> bool {
        self.next_token().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_envelope() {
        let page: PaginatedResult<Value> = serde_json::from_value(json!({
            "paging": {
                "limit": 2,
                "totalCount": 5,
                "currentToken": "cur",
                "nextToken": "nxt",
                "_links": {"self": {"href": "/ea/events/filter"}}
            },
            "data": [{"id": "a"}, {"id": "b"}]
        }))
        .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.paging.total_count, Some(5));
        assert_eq!(page.next_token(), Some("nxt"));
        assert!(page.has_more());
        assert_eq!(page.first().unwrap()["id"], "a");
        assert_eq!(page.paging.links["self"]["href"], "/ea/events/filter");
    }

    #[test]
    fn test_last_page() {
        let page: PaginatedResult<Value> = serde_json::from_value(json!({
            "paging": {"limit": 10, "totalCount": 0, "currentToken": "cur"},
            "data": []
        }))
        .unwrap();

        assert!(page.is_empty());
        assert!(!page.has_more());
        assert!(page.next_token().is_none());
        assert!(page.into_data().is_empty());
    }

    #[test]
    fn test_missing_paging_tolerated() {
        let page: PaginatedResult<Value> = serde_json::from_value(json!({"data": [1]})).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.paging, Paging::default());
        assert_eq!(page.into_data(), vec![json!(1)]);
    }
}
