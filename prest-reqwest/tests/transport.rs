//! Wire-level tests for the reqwest transport against a mock HTTP server.

use std::time::Duration;

use pretty_assertions::assert_eq;
use prest_query::prelude::*;
use prest_query::{ErrorCode, HttpMethod, HttpRequest};
use prest_reqwest::{ReqwestConfig, ReqwestExecutor};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type Outcome<T> = Result<T, RestError>;

async fn executor(server: &MockServer) -> ReqwestExecutor {
    ReqwestExecutor::from_url(server.uri()).unwrap()
}

#[tokio::test]
async fn test_query_string_reaches_the_wire_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("Authorization", "Bearer jwt"))
        .and(header("Accept", "application/vnd.pgrst.object+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "ann"})))
        .expect(1)
        .mount(&server)
        .await;

    let users = executor(&server).await.endpoint("users", "jwt").unwrap();
    let row: Outcome<Value> = users
        .select()
        .columns(["id", "name"])
        .where_([eq("owner", 1)])
        .singular()
        .on_success(|res| async move { res.json() })
        .await
        .unwrap();

    assert_eq!(row.unwrap(), json!({"id": 1, "name": "ann"}));

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("select=id,name&owner=eq.1"));
    server.verify().await;
}

#[tokio::test]
async fn test_escaped_delimiters_stay_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let users = executor(&server).await.endpoint("users", "jwt").unwrap();
    users
        .select::<Outcome<()>>()
        .where_([or([eq("name", "a,b"), in_list("id", [1, 2])])])
        .on_success(|_| async { Ok(()) })
        .await
        .unwrap()
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(
        received[0].url.query(),
        Some("or=(name.eq.a%2Cb,id.in.(1,2))")
    );
}

#[tokio::test]
async fn test_insert_conflict_routing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({"name": "ann"})))
        .respond_with(ResponseTemplate::new(409).set_body_string("duplicate key"))
        .expect(2)
        .mount(&server)
        .await;

    let users = executor(&server).await.endpoint("/users", "jwt").unwrap();
    let fields = to_fields(&json!({"name": "ann"})).unwrap();

    let lenient: Outcome<&str> = users
        .insert(fields.clone())
        .on_success(|_| async { Ok("ignored") })
        .await
        .unwrap();
    assert_eq!(lenient.unwrap(), "ignored");

    let strict: Outcome<&str> = users
        .insert(fields)
        .fail_if_already_exists()
        .on_failure(|res| async move { Err(RestError::from_response(&res)) })
        .on_success(|_| async { Ok("inserted") })
        .await
        .unwrap();
    let err = strict.unwrap_err();
    assert_eq!(err.code, ErrorCode::UnexpectedStatus);
    assert_eq!(err.context.status, Some(409));

    server.verify().await;
}

#[tokio::test]
async fn test_default_headers_and_prefer() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(header("apikey", "anon"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"deleted": true}])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ReqwestConfig::builder()
        .url(server.uri())
        .default_header("apikey", "anon")
        .build()
        .unwrap();
    let todos = ReqwestExecutor::new(config)
        .unwrap()
        .endpoint("todos", "jwt")
        .unwrap();

    let rows: Outcome<Vec<Value>> = todos
        .logic_deletion()
        .where_([eq("id", 5)])
        .returning()
        .on_success(|res| async move { res.json() })
        .await
        .unwrap();

    assert_eq!(rows.unwrap(), vec![json!({"deleted": true})]);
    server.verify().await;
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = ReqwestConfig::builder()
        .url(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let executor = ReqwestExecutor::new(config).unwrap();

    let err = executor
        .execute(HttpRequest::new(HttpMethod::Get, server.uri()))
        .await
        .unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(
        err.context.help.as_deref(),
        Some("Raise PREST_TIMEOUT_MS if the server is slow to answer")
    );
    assert!(err.display_full().contains("Help: Raise PREST_TIMEOUT_MS"));
}

#[tokio::test]
async fn test_connection_refused_is_reported() {
    let executor = ReqwestExecutor::from_url("http://127.0.0.1:1").unwrap();
    let err = executor
        .execute(HttpRequest::new(HttpMethod::Get, "http://127.0.0.1:1/users"))
        .await
        .unwrap_err();
    assert!(err.is_connection_error());
}
