//! Integration tests for paginated list calls.
//!
//! Every list response embeds its items under `_embedded.items` and links
//! the following page through `_links.next.href`. These tests cover the
//! normal walk and each way a walk can stop early.

use akeneo_api::clients::rest::{PaginationFailure, RestError};
use akeneo_api::clients::{HttpError, InvalidHttpRequestError};
use akeneo_api::{
    AkeneoClient, AkeneoConfig, ClientId, ClientSecret, HostUrl, ListQuery, Password, Resource,
    Session, Username,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn create_config(host: &str, max_pages: u32) -> AkeneoConfig {
    AkeneoConfig::builder()
        .host(HostUrl::new(host).unwrap())
        .client_id(ClientId::new("client-id").unwrap())
        .client_secret(ClientSecret::new("client-secret").unwrap())
        .username(Username::new("admin").unwrap())
        .password(Password::new("admin-password").unwrap())
        .max_pages(max_pages)
        .build()
        .unwrap()
}

fn create_client(mock_server: &MockServer) -> AkeneoClient {
    create_client_with_cap(mock_server, 100)
}

fn create_client_with_cap(mock_server: &MockServer, max_pages: u32) -> AkeneoClient {
    AkeneoClient::with_session(
        create_config(&mock_server.uri(), max_pages),
        Session::new("test-token".to_string(), None, None),
    )
    .unwrap()
}

/// A list page holding `codes`, linking to `next` when given.
fn page_body(codes: &[&str], next: Option<String>) -> Value {
    let items: Vec<Value> = codes.iter().map(|code| json!({"code": code})).collect();
    let mut links = json!({"self": {"href": "ignored"}});
    if let Some(next) = next {
        links["next"] = json!({"href": next});
    }
    json!({"_links": links, "_embedded": {"items": items}})
}

/// Matches requests without a `page` query parameter, i.e. the first page.
fn first_page(request: &Request) -> bool {
    !request.url.query_pairs().any(|(key, _)| key == "page")
}

fn codes(items: &[Value]) -> Vec<&str> {
    items.iter().filter_map(|item| item["code"].as_str()).collect()
}

// ============================================================================
// Complete walks
// ============================================================================

#[tokio::test]
async fn test_three_pages_are_concatenated_in_order() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/rest/v1/families", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(first_page)
        .and(query_param("limit", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&["a", "b"], Some(format!("{base}?page=2&limit=100")))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&["c", "d"], Some(format!("{base}?page=3&limit=100")))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["e"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let families = client.get_families(&ListQuery::new()).await.unwrap();

    assert_eq!(codes(&families), vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_single_page_without_next_link() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["ecommerce"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let channels = client.get_channels(&ListQuery::new()).await.unwrap();

    assert_eq!(codes(&channels), vec!["ecommerce"]);
}

#[tokio::test]
async fn test_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/association-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[], None)))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let types = client.get_association_types(&ListQuery::new()).await.unwrap();

    assert!(types.is_empty());
}

#[tokio::test]
async fn test_products_use_search_after_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/products"))
        .and(query_param("pagination_type", "search_after"))
        .and(query_param("limit", "25"))
        .and(query_param("scope", "ecommerce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["sku-1"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let products = client
        .get_products(&ListQuery::new().limit(25).scope("ecommerce"))
        .await
        .unwrap();

    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_child_categories_send_parent_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/categories"))
        .and(query_param(
            "search",
            r#"{"parent":[{"operator":"=","value":"master"}]}"#,
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_body(&["shoes", "shirts"], None)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let children = client.get_child_categories("master").await.unwrap();

    assert_eq!(codes(&children), vec!["shoes", "shirts"]);
}

#[tokio::test]
async fn test_attribute_options_are_listed_under_their_attribute() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/attributes/color/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["red", "blue"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let options = client
        .get_attribute_options("color", &ListQuery::new())
        .await
        .unwrap();

    assert_eq!(codes(&options), vec!["red", "blue"]);
}

#[tokio::test]
async fn test_paginator_yields_pages_lazily() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/rest/v1/attribute-groups", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/attribute-groups"))
        .and(first_page)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&["marketing"], Some(format!("{base}?page=2")))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/attribute-groups"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["technical"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let mut pages = client
        .paginate_resource(Resource::AttributeGroup, &[], &ListQuery::new())
        .unwrap();

    let first = pages.next_page().await.unwrap().unwrap();
    assert_eq!(codes(&first.items), vec!["marketing"]);
    assert!(pages.has_next());

    let second = pages.next_page().await.unwrap().unwrap();
    assert_eq!(codes(&second.items), vec!["technical"]);
    assert!(second.next_url.is_none());

    assert!(pages.next_page().await.unwrap().is_none());
    assert_eq!(pages.pages_fetched(), 2);
}

#[tokio::test]
async fn test_get_list_on_arbitrary_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/locales"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["en_US"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let locales = client
        .get_list("locales", &ListQuery::new().limit(10))
        .await
        .unwrap();

    assert_eq!(codes(&locales), vec!["en_US"]);
}

// ============================================================================
// Early stops
// ============================================================================

#[tokio::test]
async fn test_failed_page_returns_partial_items() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/rest/v1/attributes", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/attributes"))
        .and(first_page)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&["sku", "name"], Some(format!("{base}?page=2")))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/attributes"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": 500,
            "message": "Internal error"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let error = client.get_attributes(&ListQuery::new()).await.unwrap_err();

    assert_eq!(error.status(), Some(500));
    match error {
        RestError::Pagination {
            items,
            pages_fetched,
            reason: PaginationFailure::Request(HttpError::Response(response)),
        } => {
            assert_eq!(codes(&items), vec!["sku", "name"]);
            assert_eq!(pages_fetched, 1);
            assert_eq!(response.message, "Internal error");
        }
        other => panic!("Expected a failed page request, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_first_page_failure_has_no_items() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": 403,
            "message": "You are not allowed to list categories."
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let error = client.get_categories(&ListQuery::new()).await.unwrap_err();

    assert_eq!(error.status(), Some(403));
    assert_eq!(error.partial_items().map(<[Value]>::len), Some(0));
}

#[tokio::test]
async fn test_next_link_cycle_is_detected() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/rest/v1/families", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(first_page)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&["a"], Some(format!("{base}?page=2")))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Page 2 links back to itself
    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&["b"], Some(format!("{base}?page=2")))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let error = client.get_families(&ListQuery::new()).await.unwrap_err();

    match error {
        RestError::Pagination {
            items,
            pages_fetched,
            reason: PaginationFailure::Cycle { url },
        } => {
            assert_eq!(codes(&items), vec!["a", "b"]);
            assert_eq!(pages_fetched, 2);
            assert_eq!(url, format!("{base}?page=2"));
        }
        other => panic!("Expected a cycle, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_page_cap_stops_the_walk() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/rest/v1/families", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(first_page)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&["a"], Some(format!("{base}?page=2")))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&["b"], Some(format!("{base}?page=3")))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["c"], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_client_with_cap(&mock_server, 2);
    let error = client.get_families(&ListQuery::new()).await.unwrap_err();

    match error {
        RestError::Pagination {
            items,
            reason: PaginationFailure::MaxPagesExceeded { max_pages },
            ..
        } => {
            assert_eq!(codes(&items), vec!["a", "b"]);
            assert_eq!(max_pages, 2);
        }
        other => panic!("Expected the page cap, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_page_without_items_stops_the_walk() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/rest/v1/channels", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/channels"))
        .and(first_page)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&["ecommerce"], Some(format!("{base}?page=2")))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/channels"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_links": {}})))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let error = client.get_channels(&ListQuery::new()).await.unwrap_err();

    match error {
        RestError::Pagination {
            items,
            reason: PaginationFailure::MissingItems { url },
            ..
        } => {
            assert_eq!(codes(&items), vec!["ecommerce"]);
            assert_eq!(url, format!("{base}?page=2"));
        }
        other => panic!("Expected missing items, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_next_links_match_host_regardless_of_scheme_case() {
    let mock_server = MockServer::start().await;
    let upper = mock_server.uri().replacen("http://", "HTTP://", 1);
    let lower = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(first_page)
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            &["a"],
            Some(format!("{upper}/api/rest/v1/families?page=2&limit=100")),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            &["b"],
            Some(format!("{lower}/api/rest/v1/families?page=3&limit=100")),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["c"], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AkeneoClient::with_session(
        create_config(&upper, 100),
        Session::new("test-token".to_string(), None, None),
    )
    .unwrap();
    let families = client.get_families(&ListQuery::new()).await.unwrap();

    assert_eq!(codes(&families), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_foreign_next_link_is_not_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/families"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            &["a"],
            Some("https://attacker.example.com/api/rest/v1/families?page=2".to_string()),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let error = client.get_families(&ListQuery::new()).await.unwrap_err();

    match error {
        RestError::Pagination {
            items,
            reason:
                PaginationFailure::Request(HttpError::InvalidRequest(
                    InvalidHttpRequestError::ForeignUrl { url },
                )),
            ..
        } => {
            assert_eq!(codes(&items), vec!["a"]);
            assert!(url.starts_with("https://attacker.example.com"));
        }
        other => panic!("Expected a refused foreign URL, got: {other:?}"),
    }
}
