//! Normalization of structured and raw list parameters
//!
//! Both input shapes must produce the same filter body and query string.

use cvent_client::api::{normalize, FilterBody, NormalizedQuery};
use cvent_client::{FilterExpr, QueryInput, QueryParams, Sort};
use serde_json::json;

#[test]
fn test_structured_and_raw_agree() {
    let structured = normalize(&QueryParams::new().filter(r#"email eq "a@b.com""#).limit(5).into());
    let raw = normalize(&QueryInput::from(r#"filter=email eq "a@b.com"&limit=5"#));

    assert_eq!(structured, raw);
    assert_eq!(
        serde_json::to_value(&structured.filter_body).unwrap(),
        json!({"filter": "email eq \"a@b.com\""})
    );
    assert_eq!(structured.query_string, "?limit=5");
}

#[test]
fn test_empty_inputs() {
    let expected = NormalizedQuery {
        filter_body: FilterBody::default(),
        query_string: String::new(),
    };

    assert_eq!(normalize(&QueryInput::default()), expected);
    assert_eq!(normalize(&QueryParams::new().into()), expected);
    assert_eq!(normalize(&"".into()), expected);
    assert_eq!(normalize(&"?".into()), expected);
    assert_eq!(serde_json::to_string(&expected.filter_body).unwrap(), "{}");
}

#[test]
fn test_filter_never_in_query_string() {
    let normalized = normalize(&"filter=a&token=t&filter=b".into());
    assert!(!normalized.query_string.contains("filter"));
    assert_eq!(normalized.filter_body.filter.as_deref(), Some("a"));
    assert_eq!(normalized.query_string, "?token=t");
}

#[test]
fn test_structured_values_are_not_encoded() {
    let params = QueryParams::new()
        .after("2024-01-01T00:00:00Z")
        .sort(Sort::Custom("title:ASC".into()));
    let normalized = normalize(&params.into());

    assert_eq!(normalized.query_string, "?after=2024-01-01T00:00:00Z&sort=title:ASC");
}

#[test]
fn test_filter_expressions() {
    let filter = FilterExpr::eq("contact.email", "a@b.com").and(FilterExpr::eq("event.id", "ev-1"));
    let normalized = normalize(&QueryParams::new().filter(filter).into());

    assert_eq!(
        normalized.filter_body.filter.as_deref(),
        Some(r#"contact.email eq "a@b.com" AND event.id eq "ev-1""#)
    );
    assert_eq!(normalized.query_string, "");
}
