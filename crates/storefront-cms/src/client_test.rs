use serde_json::json;

use super::*;
use crate::query::CategoryFilter;

fn client(base: &str) -> CmsClient {
    CmsClient::new(base, 5, "storefront-test/0.1").unwrap()
}

#[test]
fn new_rejects_invalid_base_url() {
    let result = CmsClient::new("not a url", 5, "ua");
    assert!(
        matches!(result, Err(CmsError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn new_rejects_non_base_url() {
    let result = CmsClient::new("mailto:shop@example.com", 5, "ua");
    assert!(matches!(result, Err(CmsError::InvalidBaseUrl { .. })));
}

#[test]
fn new_strips_trailing_slash() {
    assert_eq!(client("https://cms.example.com/").base_url(), "https://cms.example.com");
}

#[test]
fn collection_url_keeps_brackets_and_commas() {
    let query = ListingQuery {
        sort: Some("-createdAt".to_owned()),
        categories: CategoryFilter::from_ids(["a", "b"]),
        limit: 10,
        page: 2,
        depth: 1,
    };
    let url = client("https://cms.example.com")
        .collection_url("products", &query.to_query_string())
        .unwrap();
    assert_eq!(url.path(), "/api/products");
    assert_eq!(
        url.query(),
        Some("sort=-createdAt&where[categories][in]=a,b&limit=10&page=2&depth=1")
    );
}

#[test]
fn collection_url_keeps_base_path_prefix() {
    let url = client("https://example.com/cms")
        .collection_url("products", "limit=1")
        .unwrap();
    assert_eq!(url.as_str(), "https://example.com/cms/api/products?limit=1");
}

#[test]
fn collection_url_escapes_relation_segment() {
    let url = client("https://cms.example.com")
        .collection_url("odd/name", "limit=1")
        .unwrap();
    assert_eq!(url.path(), "/api/odd%2Fname");
}

#[test]
fn decode_listing_rejects_missing_docs() {
    let result = decode_listing::<serde_json::Value>("products", json!({"totalDocs": 0}));
    assert!(matches!(result, Err(CmsError::MalformedListing { ref relation }) if relation == "products"));
}

#[test]
fn decode_listing_rejects_null_docs() {
    let result = decode_listing::<serde_json::Value>("products", json!({"docs": null}));
    assert!(result.as_ref().is_err_and(CmsError::is_malformed_listing));
}

#[test]
fn decode_listing_rejects_non_array_docs() {
    let result = decode_listing::<serde_json::Value>("products", json!({"docs": {"0": {}}}));
    assert!(result.as_ref().is_err_and(CmsError::is_malformed_listing));
}

#[test]
fn decode_listing_reports_deserialize_error_for_bad_envelope() {
    let result = decode_listing::<serde_json::Value>("products", json!({"docs": []}));
    assert!(
        matches!(result, Err(CmsError::Deserialize { .. })),
        "docs present but totalDocs/page missing should fail to decode"
    );
}
