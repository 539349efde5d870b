use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use reel::api::ReelApi;
use reel::conf::PopulateMode;
use reel::core::Movie;
use reel::store::MemoryStore;
use reel::testutil::{memory_service, sample_movies};

async fn setup_with(store: Arc<MemoryStore>, movies: &[Movie]) -> Router {
    let service = memory_service(store, movies, PopulateMode::Await).await;
    ReelApi::new(service).router()
}

async fn setup() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new().with_activation_polls(2));
    let router = setup_with(store.clone(), &sample_movies()).await;
    (store, router)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, bytes)
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get(router, uri).await;
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn titles(json: &Value) -> Vec<&str> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (_store, router) = setup().await;
    let (status, bytes) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"OK");
}

#[tokio::test]
async fn test_create_populates_table() {
    let (store, router) = setup().await;

    let (status, json) = get_json(&router, "/createDB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["created"], true);
    assert_eq!(json["outcome"], "created");
    assert_eq!(json["load"]["total"], 3);
    assert_eq!(json["load"]["written"], 3);
    assert_eq!(json["load"]["failed"], json!([]));
    assert_eq!(store.items("Movies").await, sample_movies());
}

#[tokio::test]
async fn test_create_twice() {
    let (store, router) = setup().await;

    get_json(&router, "/createDB").await;
    let (status, json) = get_json(&router, "/createDB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"created": false, "outcome": "already_existed"}));
    assert_eq!(store.calls().creates, 1);
    assert_eq!(store.calls().puts, 3);
}

#[tokio::test]
async fn test_query_prefix() {
    let (_store, router) = setup().await;
    get_json(&router, "/createDB").await;

    let (status, json) = get_json(&router, "/queryDB?year=2000&title=G").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&json), vec!["Gladiator", "Gone in 60 Seconds"]);

    let (status, json) = get_json(&router, "/queryMovie?year=2000&title=Go").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&json), vec!["Gone in 60 Seconds"]);
    assert_eq!(json[0]["year"], 2000);
    assert_eq!(json[0]["info"]["running_time_secs"], 7080);
}

#[tokio::test]
async fn test_query_url_encoded_title() {
    let (_store, router) = setup().await;
    get_json(&router, "/createDB").await;

    let (status, json) = get_json(&router, "/queryDB?year=2001&title=Training%20D").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&json), vec!["Training Day"]);
}

#[rstest]
#[case("/queryDB")]
#[case("/queryDB?year=2000")]
#[case("/queryDB?title=Go")]
#[case("/queryDB?year=&title=Go")]
#[case("/queryMovie?year=2000&title=")]
#[tokio::test]
async fn test_query_missing_params(#[case] uri: &str) {
    let (store, router) = setup().await;

    let (status, bytes) = get(&router, uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());
    assert_eq!(store.calls().total(), 0);
}

#[tokio::test]
async fn test_query_bad_year() {
    let (store, router) = setup().await;

    let (status, json) = get_json(&router, "/queryDB?year=nineteen&title=Go").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("year"));
    assert_eq!(store.calls().total(), 0);
}

#[tokio::test]
async fn test_query_before_create_is_empty_array() {
    let (_store, router) = setup().await;

    let (status, json) = get_json(&router, "/queryDB?year=2000&title=G").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_drop() {
    let (store, router) = setup().await;

    let (status, json) = get_json(&router, "/dropDB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"deleted": false, "outcome": "already_absent"}));
    assert_eq!(store.calls().mutations(), 0);

    get_json(&router, "/createDB").await;
    let (status, json) = get_json(&router, "/dropDB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"deleted": true, "outcome": "deleted"}));

    let (_, json) = get_json(&router, "/queryDB?year=2000&title=G").await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_probe_failure_is_server_error() {
    let (store, router) = setup().await;
    store.set_describe_failing(true);

    let (status, json) = get_json(&router, "/createDB").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("AccessDenied"));
    assert_eq!(store.calls().mutations(), 0);

    let (status, _) = get_json(&router, "/queryDB?year=2000&title=G").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_create_reports_failed_writes() {
    let store = Arc::new(MemoryStore::new().with_failing_title("Gladiator"));
    let router = setup_with(store.clone(), &sample_movies()).await;

    let (status, json) = get_json(&router, "/createDB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["created"], true);
    assert_eq!(json["load"]["written"], 2);
    assert_eq!(json["load"]["failed"][0]["year"], 2000);
    assert_eq!(json["load"]["failed"][0]["title"], "Gladiator");
    assert_eq!(store.items("Movies").await.len(), 2);
}

#[tokio::test]
async fn test_duplicate_keys_collapse_to_one_item() {
    let store = Arc::new(MemoryStore::new());
    let first = vec![Movie::new(2000, "Gladiator", json!({"rating": 8.0}))];
    let router = setup_with(store.clone(), &first).await;
    get_json(&router, "/createDB").await;

    let second = vec![
        Movie::new(2000, "Gladiator", json!({"rating": 8.5})),
        Movie::new(2000, "Gladiator", json!({"rating": 9.0})),
    ];
    let router = setup_with(store.clone(), &second).await;
    get_json(&router, "/dropDB").await;
    let (_, json) = get_json(&router, "/createDB").await;
    assert_eq!(json["load"]["written"], 2);

    let (_, json) = get_json(&router, "/queryDB?year=2000&title=Gladiator").await;
    let movies = json.as_array().unwrap();
    assert_eq!(movies.len(), 1);
    let rating = &movies[0]["info"]["rating"];
    assert!(*rating == json!(8.5) || *rating == json!(9.0));
}
