use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::HttpConfig;
use serde_json::{json, Value};
use service::{ItemInput, ItemStore};
use tower::ServiceExt;

use server::routes::{self, AppState};

fn app_with(store: std::sync::Arc<ItemStore>) -> Router {
    let http = HttpConfig { request_logging: false, compression: false, ..HttpConfig::default() };
    routes::build_router(AppState::new(store), &http)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn delete_then_list_drops_the_item() {
    let store = ItemStore::seeded();
    let app = app_with(store.clone());

    let (status, body) = send(&app, empty_request("DELETE", "/items/3")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, empty_request("GET", "/items")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|i| i["id"].as_i64().unwrap()).collect();
    assert_eq!(ids.len(), 9);
    assert!(!ids.contains(&3));

    let (status, body) = send(&app, empty_request("GET", "/items/3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "item not found"}));

    // second delete of the same id
    let (status, _) = send(&app, empty_request("DELETE", "/items/3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_is_total_replacement() {
    let store = ItemStore::seeded();
    let app = app_with(store.clone());

    let (status, body) = send(&app, json_request("PUT", "/items/2", json!({"name": "X", "value": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 2, "name": "X", "value": 5}));

    // the handler wrote through to the injected store
    let stored = store.get(2).await.unwrap();
    assert_eq!(stored.name, "X");
    assert_eq!(stored.value, 5);
}

#[tokio::test]
async fn invalid_id_checked_before_body() {
    let app = app_with(ItemStore::seeded());
    let req = Request::builder()
        .method("PUT")
        .uri("/items/abc")
        .header("content-type", "application/json")
        .body(Body::from("garbage"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid id"}));
}

#[tokio::test]
async fn create_against_empty_store_starts_at_one() {
    let store = ItemStore::empty();
    let app = app_with(store.clone());

    let (status, body) = send(&app, json_request("POST", "/items", json!({"name": "", "value": 0}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "name": "", "value": 0}));

    store.create(ItemInput::new("direct", 9)).await;
    let (_, body) = send(&app, empty_request("GET", "/items/2")).await;
    assert_eq!(body, json!({"id": 2, "name": "direct", "value": 9}));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = app_with(ItemStore::seeded());
    let res = app.oneshot(empty_request("GET", "/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
