//! End-to-end archive tests against a mocked CMS.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_archive::{
    ArchiveConfig, ArchiveController, CategoryFilter, FilterContext, FilterState, Grid,
};
use storefront_cms::CmsClient;
use storefront_core::{DocReference, Product};

fn listing(ids: &[&str], page: u32, total_docs: u64, total_pages: u32) -> serde_json::Value {
    let docs: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| json!({"id": id, "title": format!("Product {id}"), "slug": format!("p-{id}")}))
        .collect();
    json!({
        "docs": docs,
        "totalDocs": total_docs,
        "limit": 2,
        "totalPages": total_pages,
        "page": page,
        "hasPrevPage": page > 1,
        "hasNextPage": page < total_pages,
        "prevPage": null,
        "nextPage": null
    })
}

#[tokio::test]
async fn archive_pages_through_cms_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "1"))
        .and(query_param("where[categories][in][0]", "cat-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a", "b"], 1, 3, 2)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["c"], 2, 3, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(CmsClient::new(&server.uri(), 5, "storefront-test/0.1").unwrap());
    let archive = ArchiveController::new(client, ArchiveConfig::default().with_limit(2)).unwrap();
    let filters = FilterContext::new(FilterState::new(
        CategoryFilter::Single("cat-1".to_owned()),
        None,
    ));

    archive.mount(&filters);
    archive.settled().await;

    let view = archive.render();
    assert_eq!(view.grid.cards().len(), 2);
    assert_eq!(
        view.page_range.map(|r| r.to_string()).as_deref(),
        Some("Showing 1 - 2 of 3 Products")
    );
    let next = view
        .pagination
        .and_then(|p| p.next_page())
        .expect("second page should be offered");

    archive.set_page(next);
    archive.settled().await;

    let view = archive.render();
    assert_eq!(view.grid.cards()[0].href, "/products/p-c");
    assert_eq!(
        view.page_range.map(|r| r.to_string()).as_deref(),
        Some("Showing 3 - 3 of 3 Products")
    );
}

#[tokio::test]
async fn archive_surfaces_server_errors_as_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = Arc::new(CmsClient::new(&server.uri(), 5, "storefront-test/0.1").unwrap());
    let archive = ArchiveController::new(client, ArchiveConfig::default()).unwrap();

    archive.mount(&FilterContext::default());
    archive.settled().await;

    let view = archive.render();
    assert_eq!(
        view.error.as_deref(),
        Some("Unable to load \"products archive\" data at this time.")
    );
    assert!(matches!(view.grid, Grid::Empty { .. }));
}

#[tokio::test]
async fn archive_ignores_json_error_body_and_keeps_seeded_docs() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"errors": [{"message": "bad where"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let seeded: Product = serde_json::from_value(
        json!({"id": "s1", "title": "Seeded", "slug": "seeded"}),
    )
    .unwrap();
    let client = Arc::new(CmsClient::new(&server.uri(), 5, "storefront-test/0.1").unwrap());
    let archive = ArchiveController::new(
        client,
        ArchiveConfig::default()
            .with_populated_docs(vec![DocReference::resolved("products", seeded)], 1),
    )
    .unwrap();

    archive.mount(&FilterContext::default());
    archive.settled().await;

    let snapshot = archive.snapshot();
    assert!(snapshot.error.is_none());
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.results.total_docs, 1);
    assert_eq!(snapshot.results.docs[0].id, "s1");
}
