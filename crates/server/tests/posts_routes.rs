use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(upstream: &MockServer) -> Router {
    let mut cfg = AppConfig::default();
    cfg.upstream.base_url = upstream.uri();
    server::build_app(&cfg).expect("build app")
}

fn form_post(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let upstream = MockServer::start().await;
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app_for(&upstream), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn list_posts_passes_upstream_array_through() {
    let upstream = MockServer::start().await;
    let posts = json!([{"id": 1, "title": "a", "body": "b", "userId": 1}]);
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let req = Request::builder().uri("/api/posts").body(Body::empty()).unwrap();
    let (status, body) = send(app_for(&upstream), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "posts": posts}));
}

#[tokio::test]
async fn list_posts_failure_is_500_with_generic_message() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&upstream)
        .await;

    let req = Request::builder().uri("/api/posts").body(Body::empty()).unwrap();
    let (status, body) = send(app_for(&upstream), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "message": "Failed to fetch posts"}));
}

#[tokio::test]
async fn add_post_returns_created_post() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(json!({"title": "T", "body": "B", "userId": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 101, "title": "T", "body": "B", "userId": 1})))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = send(app_for(&upstream), form_post("/api/posts/actions/addPost", "title=T&body=B")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "newPost": {"id": 101, "title": "T", "body": "B", "userId": 1}})
    );
}

#[tokio::test]
async fn add_post_keeps_fields_the_upstream_adds() {
    let upstream = MockServer::start().await;
    let echo = json!({"id": 101, "title": "T", "body": "B", "createdAt": "2024-01-01"});
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(echo.clone()))
        .mount(&upstream)
        .await;

    let (status, body) = send(app_for(&upstream), form_post("/api/posts/actions/addPost", "title=T&body=B")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "newPost": echo}));
}

#[tokio::test]
async fn add_post_without_title_is_400_and_never_calls_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let (status, body) = send(app_for(&upstream), form_post("/api/posts/actions/addPost", "title=&body=B")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "message": "Título y cuerpo son requeridos"}));
}

#[tokio::test]
async fn edit_post_puts_to_submitted_id() {
    let upstream = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/posts/3"))
        .and(body_json(json!({"id": 3, "title": "New title", "body": "B", "userId": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "title": "New title", "body": "B", "userId": 1})))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = send(
        app_for(&upstream),
        form_post("/api/posts/actions/editPost", "id=3&title=New+title&body=B"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["updatedPost"]["title"], "New title");
}

#[tokio::test]
async fn delete_post_returns_numeric_id() {
    let upstream = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = send(app_for(&upstream), form_post("/api/posts/actions/deletePost", "id=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "id": 5}));
}

#[tokio::test]
async fn delete_post_with_decimal_id_returns_it_as_number() {
    let upstream = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/2.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = send(app_for(&upstream), form_post("/api/posts/actions/deletePost", "id=2.5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "id": 2.5}));
}

#[tokio::test]
async fn metrics_expose_action_counters() {
    let upstream = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&upstream)
        .await;
    let app = app_for(&upstream);
    let _ = send(app.clone(), form_post("/api/posts/actions/deletePost", "id=1")).await;

    let res = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("post_actions_total"));
}
