#![allow(clippy::unwrap_used)]
// Integration tests for `WooClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Map, Value, json};
use url::Url;
use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wcflux_api::{
    BatchRequest, Credentials, Error, ProductQuery, RouteStyle, TransportConfig, WooClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, WooClient) {
    let server = MockServer::start().await;
    let client = WooClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        RouteStyle::Pretty,
        None,
    );
    (server, client)
}

fn body(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

// ── Auth & routing ──────────────────────────────────────────────────

#[tokio::test]
async fn test_consumer_key_sent_as_basic_auth() {
    let server = MockServer::start().await;
    let client = WooClient::new(
        &server.uri(),
        Credentials::ConsumerKey {
            key: "ck_live".into(),
            secret: SecretString::from("cs_live".to_string()),
        },
        &TransportConfig::default(),
        RouteStyle::Pretty,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/12"))
        .and(basic_auth("ck_live", "cs_live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12, "name": "Mug"})))
        .expect(1)
        .mount(&server)
        .await;

    let product = client.get_product(12).await.unwrap();
    assert_eq!(product.name, "Mug");
}

#[tokio::test]
async fn test_query_param_route_style() {
    let server = MockServer::start().await;
    let client = WooClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        RouteStyle::QueryParam,
        None,
    );

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("rest_route", "/wc/v3/products/tags"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "red"}])))
        .mount(&server)
        .await;

    let page = client.list_tags(2, 10, None).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "red");
}

// ── Products ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products_reads_paging_headers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "2"))
        .and(query_param("search", "hoodie"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-WP-Total", "3")
                .insert_header("X-WP-TotalPages", "2")
                .set_body_json(json!([
                    {"id": 1, "name": "Hoodie", "sku": "H-1"},
                    {"id": 2, "name": "Hoodie Zip", "sku": "H-2"}
                ])),
        )
        .mount(&server)
        .await;

    let query = ProductQuery {
        search: Some("hoodie".into()),
        ..ProductQuery::page(1, 2)
    };
    let page = client.list_products(&query).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, Some(3));
    assert_eq!(page.total_pages, Some(2));
    assert!(page.has_more(1, 2));
}

#[tokio::test]
async fn test_update_product_sends_partial_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/wp-json/wc/v3/products/42"))
        .and(body_json(json!({"name": "B"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42, "name": "B"})))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .update_product(42, &body(json!({"name": "B"})))
        .await
        .unwrap();
    assert_eq!(updated.id, 42);
    assert_eq!(updated.name, "B");
}

#[tokio::test]
async fn test_delete_product_passes_force() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/wp-json/wc/v3/products/9"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
        .mount(&server)
        .await;

    let deleted = client.delete_product(9, true).await.unwrap();
    assert_eq!(deleted.id, 9);
}

#[tokio::test]
async fn test_products_with_sku_limits_fields() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("sku", "TAKEN"))
        .and(query_param("_fields", "id,sku"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 5, "sku": "TAKEN"}])))
        .mount(&server)
        .await;

    let found = client.products_with_sku("TAKEN").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].sku, "TAKEN");
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_wordpress_error_envelope_is_parsed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "woocommerce_rest_product_invalid_id",
            "message": "Invalid ID.",
            "data": {"status": 404}
        })))
        .mount(&server)
        .await;

    let err = client.get_product(404).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.api_error_code(),
        Some("woocommerce_rest_product_invalid_id")
    );
    assert!(matches!(err, Error::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "woocommerce_rest_cannot_view",
            "message": "Sorry, you cannot view this resource.",
            "data": {"status": 401}
        })))
        .mount(&server)
        .await;

    let result = client.get_product(1).await;
    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message.contains("cannot view")),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_non_json_error_body_kept_as_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.get_product(1).await.unwrap_err();
    assert!(err.is_transient());
    assert!(
        matches!(err, Error::Api { status: 502, ref message, code: None } if message == "Bad Gateway")
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.get_product(1).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { ref body, .. } if body.contains("maintenance")));
}

// ── Variations ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_batch_variations_posts_update_list() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products/10/variations/batch"))
        .and(body_json(json!({
            "update": [{"id": 11, "regular_price": "9.99"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "update": [{"id": 11, "regular_price": "9.99"}]
        })))
        .mount(&server)
        .await;

    let request = BatchRequest {
        update: vec![body(json!({"id": 11, "regular_price": "9.99"}))],
        ..BatchRequest::default()
    };
    let resp = client.batch_variations(10, &request).await.unwrap();
    assert_eq!(resp.update.len(), 1);
    assert_eq!(resp.update[0].variation.regular_price, "9.99");
    assert!(resp.update[0].error.is_none());
    assert!(resp.create.is_empty());
}

#[tokio::test]
async fn test_paginate_all_follows_total_pages() {
    let (server, client) = setup().await;

    for (page, ids) in [(1, vec![1, 2]), (2, vec![3])] {
        let items: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
        Mock::given(method("GET"))
            .and(path("/wp-json/wc/v3/products/7/variations"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-WP-TotalPages", "2")
                    .set_body_json(items),
            )
            .mount(&server)
            .await;
    }

    let all = client
        .paginate_all(2, |page, per_page| client.list_variations(7, page, per_page))
        .await
        .unwrap();
    let ids: Vec<i64> = all.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// ── Terms & reviews ─────────────────────────────────────────────────

#[tokio::test]
async fn test_create_category_posts_name_and_parent() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products/categories"))
        .and(body_json(json!({"name": "Shirts", "parent": 3})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 20, "name": "Shirts", "slug": "shirts", "parent": 3
        })))
        .mount(&server)
        .await;

    let category = client.create_category("Shirts", 3).await.unwrap();
    assert_eq!(category.id, 20);
    assert_eq!(category.parent, 3);
}

#[tokio::test]
async fn test_list_reviews_filters_by_product() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/reviews"))
        .and(query_param("product", "4,5"))
        .and(query_param("status", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "product_id": 4, "rating": 5, "status": "approved"}
        ])))
        .mount(&server)
        .await;

    let page = client.list_reviews(1, 25, &[4, 5], None).await.unwrap();
    assert_eq!(page.data[0].rating, 5);
}

#[tokio::test]
async fn test_create_variation_posts_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/products/10/variations"))
        .and(body_json(json!({
            "regular_price": "12",
            "attributes": [{"id": 1, "option": "L"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 31,
            "regular_price": "12"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_variation(
            10,
            &body(json!({
                "regular_price": "12",
                "attributes": [{"id": 1, "option": "L"}]
            })),
        )
        .await
        .unwrap();
    assert_eq!(created.id, 31);
}

#[tokio::test]
async fn test_delete_variation_always_forces() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/wp-json/wc/v3/products/10/variations/31"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 31})))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client.delete_variation(10, 31).await.unwrap();
    assert_eq!(deleted.id, 31);
}

// ── Reviews & shipping classes ──────────────────────────────────────

#[tokio::test]
async fn test_get_review_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/reviews/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "product_id": 42,
            "status": "hold",
            "reviewer": "Ann",
            "rating": 4
        })))
        .mount(&server)
        .await;

    let review = client.get_review(5).await.unwrap();
    assert_eq!(review.id, 5);
    assert_eq!(review.product_id, 42);
    assert_eq!(review.status, "hold");
}

#[tokio::test]
async fn test_get_shipping_class_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/shipping_classes/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "Bulky",
            "slug": "bulky",
            "count": 2
        })))
        .mount(&server)
        .await;

    let class = client.get_shipping_class(3).await.unwrap();
    assert_eq!(class.name, "Bulky");
    assert_eq!(class.count, 2);
}

// ── Timeouts ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_slow_store_reports_configured_timeout() {
    let server = MockServer::start().await;
    let client = WooClient::new(
        &server.uri(),
        Credentials::ApplicationPassword {
            username: "admin".into(),
            password: SecretString::from("pw".to_string()),
        },
        &TransportConfig {
            timeout: std::time::Duration::from_secs(1),
            ..TransportConfig::default()
        },
        RouteStyle::Pretty,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/12"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 12}))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client.get_product(12).await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_secs: 1 }), "{err:?}");
}
