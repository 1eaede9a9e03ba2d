//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: options → client → HTTP requests → records

use gitlab_requester::{
    ClientContext, ClientOptions, Error, PageResult, PaginationOptions, RetryPolicy,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ClientContext {
    ClientContext::new(ClientOptions::new().url(server.uri()).token("secret")).unwrap()
}

fn next_link(server: &MockServer, page: u32) -> String {
    format!(
        "<{}/api/v4/projects?page={page}&per_page=2>; rel=\"next\"",
        server.uri()
    )
}

/// Mount three pages of `/projects`, linked with `rel="next"`
async fn mount_three_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-page", "3")
                .insert_header("x-total-pages", "3")
                .insert_header("x-next-page", "")
                .set_body_json(json!([{"id": 5}])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-page", "2")
                .insert_header("x-total-pages", "3")
                .insert_header("link", next_link(server, 3).as_str())
                .set_body_json(json!([{"id": 3}, {"id": 4}])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-page", "1")
                .insert_header("x-per-page", "2")
                .insert_header("x-next-page", "2")
                .insert_header("x-total-pages", "3")
                .insert_header("x-total", "5")
                .insert_header("link", next_link(server, 2).as_str())
                .set_body_json(json!([{"id": 1}, {"id": 2}])),
        )
        .mount(server)
        .await;
}

fn ids(records: &[Value]) -> Vec<u64> {
    records.iter().filter_map(|r| r["id"].as_u64()).collect()
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_follows_next_links_in_order() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let result = client(&server)
        .get::<Value>("projects", &PaginationOptions::new().per_page(2))
        .await
        .unwrap();

    assert_eq!(ids(result.records()), vec![1, 2, 3, 4, 5]);
    assert!(result.pagination().is_none());
}

#[tokio::test]
async fn test_max_pages_stops_following() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let result = client(&server)
        .get::<Value>("projects", &PaginationOptions::new().per_page(2).max_pages(2))
        .await
        .unwrap();

    assert_eq!(ids(result.records()), vec![1, 2, 3, 4]);
    // Page 3 is never requested
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_pinned_page_is_single_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-page", "2")
                .insert_header("link", next_link(&server, 3).as_str())
                .set_body_json(json!([{"id": 3}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .get::<Value>("projects", &PaginationOptions::new().page(2))
        .await
        .unwrap();

    assert_eq!(ids(result.records()), vec![3]);
}

#[tokio::test]
async fn test_show_pagination_wraps_with_first_page_metadata() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let result = client(&server)
        .get::<Value>(
            "projects",
            &PaginationOptions::new().per_page(2).show_pagination(true),
        )
        .await
        .unwrap();

    let serialized = serde_json::to_value(&result).unwrap();
    assert_eq!(
        serialized["pagination"],
        json!({
            "perPage": 2,
            "next": 2,
            "current": 1,
            "previous": null,
            "total": 3,
            "totalRecords": 5
        })
    );
    assert_eq!(serialized["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_query_keys_are_snake_cased() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("order_by", "name"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .get::<Value>(
            "projects",
            &PaginationOptions::new().per_page(50).param("orderBy", "name"),
        )
        .await
        .unwrap();

    assert_eq!(result, PageResult::Records(vec![]));
}

#[tokio::test]
async fn test_typed_records() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Project {
        id: u64,
        path_with_namespace: String,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "path_with_namespace": "group/app", "visibility": "private"}
        ])))
        .mount(&server)
        .await;

    let projects = client(&server)
        .get::<Project>("projects", &PaginationOptions::new())
        .await
        .unwrap()
        .into_records();

    assert_eq!(
        projects,
        vec![Project {
            id: 7,
            path_with_namespace: "group/app".to_string()
        }]
    );
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_private_token_header_on_every_page() {
    let server = MockServer::start().await;

    mount_three_pages(&server).await;
    let ctx = client(&server);
    ctx.get::<Value>("projects", &PaginationOptions::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    for request in requests {
        assert_eq!(
            request
                .headers
                .get("private-token")
                .and_then(|v| v.to_str().ok()),
            Some("secret")
        );
        assert!(request.headers.get("authorization").is_none());
    }
}

#[tokio::test]
async fn test_oauth_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/user"))
        .and(header("authorization", "Bearer oauth-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = ClientContext::new(
        ClientOptions::new()
            .url(server.uri())
            .token("ignored")
            .oauth_token("oauth-123"),
    )
    .unwrap();

    let result = ctx.get::<Value>("user", &PaginationOptions::new()).await.unwrap();
    assert_eq!(result.records(), &[json!({"id": 1})]);
}

#[test]
fn test_missing_credentials_rejected() {
    let err = ClientContext::new(ClientOptions::new()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_rate_limited_page_is_retried_after_wait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/issues"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 9}])))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let result = client(&server)
        .get::<Value>("issues", &PaginationOptions::new())
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(ids(result.records()), vec![9]);
}

#[tokio::test]
async fn test_rate_limit_retries_are_bounded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let ctx = ClientContext::new(
        ClientOptions::new()
            .url(server.uri())
            .token("secret")
            .retry(RetryPolicy::new(2, 1)),
    )
    .unwrap();

    let err = ctx
        .get::<Value>("issues", &PaginationOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_rate_limit());
}

#[tokio::test]
async fn test_server_error_propagates_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .get::<Value>("projects", &PaginationOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_post_decamelizes_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/1/issues"))
        .and(header("private-token", "secret"))
        .and(body_json(json!({"title": "Bug", "assignee_ids": [3]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"iid": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .post("projects/1/issues", json!({"title": "Bug", "assigneeIds": [3]}))
        .await
        .unwrap();

    assert_eq!(created, json!({"iid": 12}));
}

#[tokio::test]
async fn test_post_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/1/variables"))
        .and(body_string_contains("key=DEPLOY"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"key": "DEPLOY"})))
        .expect(1)
        .mount(&server)
        .await;

    let fields = json!({"key": "DEPLOY", "value": "1"});
    let created = client(&server)
        .post_form("projects/1/variables", fields.as_object().unwrap())
        .await
        .unwrap();

    assert_eq!(created["key"], "DEPLOY");
}

#[tokio::test]
async fn test_put_and_delete() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/1"))
        .and(body_json(json!({"default_branch": "main"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = client(&server);
    let updated = ctx
        .put("projects/1", json!({"defaultBranch": "main"}))
        .await
        .unwrap();
    assert_eq!(updated, json!({"id": 1}));

    let deleted = ctx.delete("projects/1", Value::Null).await.unwrap();
    assert_eq!(deleted, Value::Null);
}

#[tokio::test]
async fn test_mutation_is_not_retried_on_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .post("projects", json!({"name": "x"}))
        .await
        .unwrap_err();

    assert!(err.is_rate_limit());
}
