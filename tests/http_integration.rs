//! End-to-end tests through the reqwest transport.

use prest::prelude::*;
use prest::ReqwestExecutor;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Todo {
    id: i64,
    task: String,
}

#[tokio::test]
async fn test_crud_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{"id": 1, "task": "write"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("task", "ilike.*write*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "task": "write"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/todos"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let todos = ReqwestExecutor::from_url(server.uri())
        .unwrap()
        .endpoint("todos", "jwt")
        .unwrap();

    let created: RestResult<Vec<Todo>> = todos
        .insert(to_fields(&json!({"task": "write"})).unwrap())
        .returning()
        .on_success(|res| async move { res.json() })
        .await
        .unwrap();
    let created = created.unwrap();
    assert_eq!(created, vec![Todo { id: 1, task: "write".into() }]);

    let found: RestResult<Vec<Todo>> = todos
        .select()
        .where_([ilike("task", "*write*")])
        .on_success(|res| async move { res.json() })
        .await
        .unwrap();
    assert_eq!(found.unwrap(), created);

    let deleted: RestResult<()> = todos
        .delete()
        .where_([eq("id", created[0].id)])
        .on_success(|_| async { Ok(()) })
        .await
        .unwrap();
    assert!(deleted.is_ok());

    server.verify().await;
}

#[tokio::test]
async fn test_server_error_goes_to_failure_handler() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let todos = ReqwestExecutor::from_url(server.uri())
        .unwrap()
        .endpoint("todos", "jwt")
        .unwrap();

    let outcome: RestResult<()> = todos
        .select()
        .on_failure(|res| async move { Err(RestError::from_response(&res)) })
        .on_success(|_| async { Ok(()) })
        .await
        .unwrap();

    let err = outcome.unwrap_err();
    assert_eq!(err.context.status, Some(503));
    assert!(err.message.contains("maintenance"));
}
