use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::shell::http::router;
use crate::shell::state::AppState;

fn app() -> Router {
    router(AppState::in_memory(16).expect("wiring failed"))
}

async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        })
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn it_should_create_change_and_read_back_an_item() {
    let router = app();
    let (status, created) = call(&router, "POST", "/inventory", Some(json!({"name": "widget"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &router,
        "POST",
        &format!("/inventory/{id}/check-in"),
        Some(json!({"count": 7, "expected_version": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, details) = call(&router, "GET", &format!("/inventory/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        details,
        json!({"id": id, "name": "widget", "current_count": 7, "version": 2})
    );

    let (status, list) = call(&router, "GET", "/inventory", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([{"id": id, "name": "widget"}]));
}

#[tokio::test]
async fn it_should_answer_409_when_a_client_acts_on_a_stale_version() {
    let router = app();
    let (_, created) = call(&router, "POST", "/inventory", Some(json!({"name": "widget"}))).await;
    let id = created["id"].as_str().unwrap().to_string();
    let rename = |name: &str| Some(json!({"name": name, "expected_version": 1}));

    let (first, _) = call(&router, "POST", &format!("/inventory/{id}/rename"), rename("x")).await;
    let (second, _) = call(&router, "POST", &format!("/inventory/{id}/rename"), rename("y")).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::CONFLICT);
    let (_, details) = call(&router, "GET", &format!("/inventory/{id}"), None).await;
    assert_eq!(details["name"], "x");
}

#[tokio::test]
async fn it_should_hide_a_deactivated_item() {
    let router = app();
    let (_, created) = call(&router, "POST", "/inventory", Some(json!({"name": "widget"}))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &router,
        "POST",
        &format!("/inventory/{id}/deactivate"),
        Some(json!({"expected_version": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&router, "GET", &format!("/inventory/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = call(&router, "GET", "/inventory", None).await;
    assert_eq!(list, json!([]));
}
