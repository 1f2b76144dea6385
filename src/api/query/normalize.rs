//! Split list/search parameters into a JSON filter body and a URL query string
//!
//! Search endpoints take their `filter` in the request body and everything else
//! in the query string. Values are passed through without URL-encoding, so a
//! structured value containing `&` or `=` produces an ambiguous query string.

use serde::Serialize;

use super::params::{QueryInput, QueryParams};

/// Body sent to `POST /ea/{resource}/filter`; serializes to `{}` when empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl FilterBody {
    /// An empty filter means no filter
    fn from_value(filter: Option<String>) -> Self {
        Self {
            filter: filter.filter(|filter| !filter.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub filter_body: FilterBody,
    /// `""` or `?k=v&...`
    pub query_string: String,
}

pub fn normalize(input: &QueryInput) -> NormalizedQuery {
    match input {
        QueryInput::Structured(params) => normalize_params(params),
        QueryInput::Raw(raw) => normalize_raw(raw),
    }
}

fn normalize_params(params: &QueryParams) -> NormalizedQuery {
    let limit = params.limit.map(|limit| limit.to_string());
    let sort = params.sort.as_ref().map(|sort| sort.as_str().to_string());

    let segments: Vec<String> = [
        ("after", params.after.as_deref()),
        ("before", params.before.as_deref()),
        ("locale", params.locale.as_deref()),
        ("limit", limit.as_deref()),
        ("sort", sort.as_deref()),
        ("token", params.token.as_deref()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|value| format!("{}={}", key, value)))
    .collect();

    NormalizedQuery {
        filter_body: FilterBody::from_value(params.filter.clone()),
        query_string: to_query_string(&segments),
    }
}

fn normalize_raw(raw: &str) -> NormalizedQuery {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut filter = None;
    let mut segments = Vec::new();

    for segment in raw.split('&').filter(|segment| !segment.is_empty()) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        if key == "filter" {
            if filter.is_none() {
                filter = Some(decode_component(value));
            }
            continue;
        }
        segments.push(segment);
    }

    NormalizedQuery {
        filter_body: FilterBody::from_value(filter),
        query_string: to_query_string(&segments),
    }
}

/// Decode a query-string component for use in a JSON body.
/// Falls back to the value as given when the decoded bytes are not UTF-8.
fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

fn to_query_string<S: AsRef<str>>(segments: &[S]) -> String {
    if segments.is_empty() {
        return String::new();
    }

    let joined = segments
        .iter()
        .map(|segment| segment.as_ref())
        .collect::<Vec<&str>>()
        .join("&");
    format!("?{}", joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::params::Sort;

    #[test]
    fn test_structured_fixed_key_order() {
        let params = QueryParams::new()
            .token("t1")
            .sort(Sort::StartAsc)
            .limit(20)
            .locale("en-US")
            .before("2024-12-31")
            .after("2024-01-01");

        let normalized = normalize(&params.into());
        assert_eq!(
            normalized.query_string,
            "?after=2024-01-01&before=2024-12-31&locale=en-US&limit=20&sort=start:ASC&token=t1"
        );
        assert!(normalized.filter_body.is_empty());
    }

    #[test]
    fn test_raw_keeps_order_and_drops_every_filter() {
        let normalized = normalize(&"?token=abc&filter=a%20eq%201&limit=5&filter=ignored".into());
        assert_eq!(normalized.filter_body.filter.as_deref(), Some("a eq 1"));
        assert_eq!(normalized.query_string, "?token=abc&limit=5");
    }

    #[test]
    fn test_raw_skips_empty_segments() {
        let normalized = normalize(&"&&limit=5&&".into());
        assert_eq!(normalized.query_string, "?limit=5");
    }

    #[test]
    fn test_raw_pairs_kept_verbatim() {
        let normalized = normalize(&"flag&limit=5".into());
        assert_eq!(normalized.query_string, "?flag&limit=5");
    }

    #[test]
    fn test_raw_splits_at_first_equals() {
        let normalized = normalize(&"filter=id eq \"a=b\"&after=x=y".into());
        assert_eq!(normalized.filter_body.filter.as_deref(), Some("id eq \"a=b\""));
        assert_eq!(normalized.query_string, "?after=x=y");
    }

    #[test]
    fn test_raw_plus_decodes_to_space() {
        let normalized = normalize(&"filter=email+eq+%22a%40b.com%22".into());
        assert_eq!(
            normalized.filter_body.filter.as_deref(),
            Some("email eq \"a@b.com\"")
        );
        assert_eq!(normalized.query_string, "");
    }

    #[test]
    fn test_raw_malformed_escape_kept() {
        let normalized = normalize(&"filter=100%zz".into());
        assert_eq!(normalized.filter_body.filter.as_deref(), Some("100%zz"));
    }

    #[test]
    fn test_empty_filter_is_no_filter() {
        let inputs: [QueryInput; 4] = [
            QueryParams::new().filter("").limit(5).into(),
            "filter=&limit=5".into(),
            "filter&limit=5".into(),
            "filter=&filter=later&limit=5".into(),
        ];

        for input in &inputs {
            let normalized = normalize(input);
            assert!(normalized.filter_body.is_empty(), "{:?}", input);
            assert_eq!(serde_json::to_string(&normalized.filter_body).unwrap(), "{}");
            assert_eq!(normalized.query_string, "?limit=5");
        }
    }

    #[test]
    fn test_filter_body_serialization() {
        assert_eq!(serde_json::to_string(&FilterBody::default()).unwrap(), "{}");
        let body = FilterBody {
            filter: Some("id eq \"1\"".into()),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"filter": "id eq \"1\""})
        );
    }
}
