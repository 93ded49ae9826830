//! Product page loading against a mocked CMS.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_cms::CmsClient;
use storefront_pages::{load_product_page, product_slugs};

fn test_client(server: &MockServer) -> CmsClient {
    CmsClient::new(&server.uri(), 5, "storefront-test/0.1").expect("failed to build test CmsClient")
}

fn one_doc(doc: serde_json::Value) -> serde_json::Value {
    json!({
        "docs": [doc],
        "totalDocs": 1,
        "totalPages": 1,
        "page": 1,
        "hasPrevPage": false,
        "hasNextPage": false,
        "prevPage": null,
        "nextPage": null
    })
}

#[tokio::test]
async fn loads_product_with_paywall_and_related_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("where[slug][equals]", "silk-scarf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_doc(json!({
            "id": "p1",
            "title": "Silk Scarf",
            "slug": "silk-scarf",
            "enablePaywall": true,
            "categories": [{"id": "c1", "title": "Accessories"}],
            "relatedProducts": [
                {"id": "p2", "title": "Linen Scarf", "slug": "linen-scarf"},
                "p3"
            ]
        }))))
        .mount(&server)
        .await;

    let page = load_product_page(&test_client(&server), "silk-scarf", false)
        .await
        .expect("product should be found");

    assert_eq!(page.hero.title, "Silk Scarf");
    assert_eq!(page.hero.categories, vec!["Accessories"]);
    assert!(page.show_paywall);
    assert_eq!(page.related.heading, "Related Products");
    assert_eq!(page.related.cards.len(), 1);
    assert_eq!(page.related.cards[0].href, "/products/linen-scarf");
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [],
            "totalDocs": 0,
            "totalPages": 0,
            "page": 1,
            "hasPrevPage": false,
            "hasNextPage": false
        })))
        .mount(&server)
        .await;

    assert!(load_product_page(&test_client(&server), "nope", false).await.is_none());
}

#[tokio::test]
async fn cms_failure_is_treated_as_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(load_product_page(&test_client(&server), "silk-scarf", true).await.is_none());
}

#[tokio::test]
async fn product_slugs_lists_every_slug() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("depth", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [
                {"id": "p1", "slug": "silk-scarf"},
                {"id": "p2", "slug": "linen-scarf"}
            ],
            "totalDocs": 2,
            "totalPages": 1,
            "page": 1,
            "hasPrevPage": false,
            "hasNextPage": false
        })))
        .mount(&server)
        .await;

    assert_eq!(
        product_slugs(&test_client(&server)).await,
        vec!["silk-scarf", "linen-scarf"]
    );
}

#[tokio::test]
async fn product_slugs_is_empty_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(product_slugs(&test_client(&server)).await.is_empty());
}
