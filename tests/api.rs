use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use dataset_explorer::{config::Config, create_router, AppState};

const BODY_LIMIT: usize = 4 * 1024 * 1024;

fn app() -> Router {
    let state = AppState::new(Config::default()).expect("mock catalog");
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn sign_in(app: &Router, email: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/v1/auth/sign-in",
        None,
        Some(json!({ "email": email, "password": "secret" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_catalog_and_scoring() {
    let app = app();
    let response = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["catalog"], "mock");
    assert_eq!(body["scoring"], "deterministic");
}

#[tokio::test]
async fn list_filters_by_search_and_tags() {
    let app = app();

    let response = send(&app, Method::GET, "/api/v1/datasets", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let all = json_body(response).await;
    assert_eq!(all.as_array().unwrap().len(), 15);
    assert_eq!(all[0]["is_followed"], false);

    let response = send(&app, Method::GET, "/api/v1/datasets?tags=text,nlp&search=cola", None, None).await;
    let filtered = json_body(response).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], "3");
}

#[tokio::test]
async fn unknown_dataset_is_not_found() {
    let app = app();

    let response = send(&app, Method::GET, "/api/v1/datasets/missing", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Dataset not found");
    assert_eq!(body["status"], 404);

    let response = send(&app, Method::GET, "/api/v1/datasets/missing/impact", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn impact_follows_download_buckets() {
    let app = app();

    let response = send(&app, Method::GET, "/api/v1/datasets/1/impact", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let high = json_body(response).await;
    assert_eq!(high["level"], "high");
    assert!(high["score"].as_u64().unwrap() >= 70);
    assert_eq!(high["factors"].as_array().unwrap().len(), 4);
    assert_eq!(high["factors"][0]["name"], "Data Size");
    assert_eq!(high["recommendations"].as_array().unwrap().len(), 4);

    let response = send(&app, Method::GET, "/api/v1/datasets/3/impact", None, None).await;
    let low = json_body(response).await;
    assert_eq!(low["level"], "low");
    assert!(low["score"].as_u64().unwrap() < 40);

    // deterministic scoring repeats itself
    let response = send(&app, Method::GET, "/api/v1/datasets/1/impact", None, None).await;
    assert_eq!(json_body(response).await, high);
}

#[tokio::test]
async fn chart_is_png() {
    let app = app();

    let response = send(&app, Method::GET, "/api/v1/datasets/2/impact/chart?size=200", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn chart_size_out_of_range_is_rejected() {
    let app = app();

    let response = send(&app, Method::GET, "/api/v1/datasets/2/impact/chart?size=50", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, Method::GET, "/api/v1/datasets/2/impact/chart?size=5000", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn posted_assessment_is_validated_before_rendering() {
    let app = app();
    let assessment = json!({
        "level": "high",
        "score": 20,
        "factors": [],
        "recommendations": []
    });

    let response = send(&app, Method::POST, "/api/v1/impact/chart", None, Some(assessment)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let assessment = json!({
        "level": "medium",
        "score": 55,
        "factors": [
            { "name": "Data Size", "value": 20.0, "description": "Volume of data" }
        ],
        "recommendations": []
    });

    let response = send(&app, Method::POST, "/api/v1/impact/chart", None, Some(assessment)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn follow_lifecycle() {
    let app = app();

    let response = send(&app, Method::POST, "/api/v1/datasets/4/follow", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = sign_in(&app, "Ada@Example.com").await;

    let response = send(&app, Method::GET, "/api/v1/users/me", Some(&token), None).await;
    let me = json_body(response).await;
    assert_eq!(me["email"], "ada@example.com");
    assert_eq!(me["name"], "Ada");

    let response = send(&app, Method::POST, "/api/v1/datasets/4/follow", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, Method::POST, "/api/v1/datasets/4/follow", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(&app, Method::POST, "/api/v1/datasets/missing/follow", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::GET, "/api/v1/users/me/follows", Some(&token), None).await;
    let follows = json_body(response).await;
    assert_eq!(follows.as_array().unwrap().len(), 1);
    assert_eq!(follows[0]["id"], "4");
    assert_eq!(follows[0]["is_followed"], true);

    let response = send(&app, Method::GET, "/api/v1/datasets/4", Some(&token), None).await;
    assert_eq!(json_body(response).await["is_followed"], true);

    let response = send(&app, Method::GET, "/api/v1/users/me/dashboard", Some(&token), None).await;
    let dashboard = json_body(response).await;
    assert_eq!(dashboard["followed"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["recent"].as_array().unwrap().len(), 3);

    let response = send(&app, Method::DELETE, "/api/v1/datasets/4/follow", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::DELETE, "/api/v1/datasets/4/follow", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::POST, "/api/v1/auth/sign-out", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, "/api/v1/users/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_up_rejects_duplicates_and_bad_input() {
    let app = app();
    let account = json!({ "email": "grace@example.com", "password": "pw", "name": "Grace" });

    let response = send(&app, Method::POST, "/api/v1/auth/sign-up", None, Some(account.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let session = json_body(response).await;
    assert_eq!(session["user"]["name"], "Grace");

    let response = send(&app, Method::POST, "/api/v1/auth/sign-up", None, Some(account)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/sign-in",
        None,
        Some(json!({ "email": "not-an-email", "password": "pw" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tags_are_distinct_and_filterable() {
    let app = app();

    let response = send(&app, Method::GET, "/api/v1/tags?q=vis", None, None).await;
    let tags = json_body(response).await;
    let tags: Vec<&str> = tags.as_array().unwrap().iter().map(|t| t.as_str().unwrap()).collect();
    assert!(tags.contains(&"vision"));
    assert!(tags.contains(&"computer-vision"));
    assert!(tags.iter().all(|t| t.contains("vis")));
}
