//! Handler tests for the Users domain, backed by the in-memory repository.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::{InMemoryUserRepository, UserService, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "users-handler-test-secret-0123456789";

fn app() -> axum::Router {
    let auth = JwtAuth::new(&JwtConfig::new(SECRET));
    handlers::router(UserService::new(InMemoryUserRepository::new(), auth))
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
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
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn ada(is_admin: bool) -> Value {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "correct horse",
        "phone": "+44 20 0000",
        "isAdmin": is_admin,
        "city": "London"
    })
}

#[tokio::test]
async fn test_register_hides_hash_and_drops_admin_flag() {
    let app = app();

    let (status, body) = send(&app, json_request("POST", "/register", ada(true))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["isAdmin"], false);
    assert_eq!(body["city"], "London");
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password").is_none());
    assert!(mongodb::bson::oid::ObjectId::parse_str(body["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_admin_create_keeps_flag() {
    let app = app();
    let (status, body) = send(&app, json_request("POST", "/", ada(true))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isAdmin"], true);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = app();
    send(&app, json_request("POST", "/register", ada(false))).await;

    let mut again = ada(false);
    again["email"] = json!("ADA@example.com");
    let (status, body) = send(&app, json_request("POST", "/register", again)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "CONFLICT");
}

#[tokio::test]
async fn test_invalid_registration_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/register",
            json!({ "name": "Ada", "email": "not-an-email", "password": "correct horse" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_returns_token_for_user() {
    let app = app();
    let (_, created) = send(&app, json_request("POST", "/", ada(true))).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/login",
            json!({ "email": "Ada@Example.com", "password": "correct horse" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], "ada@example.com");

    let claims = JwtAuth::new(&JwtConfig::new(SECRET))
        .verify_token(body["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.sub, created["id"].as_str().unwrap());
    assert!(claims.is_admin);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_alike() {
    let app = app();
    send(&app, json_request("POST", "/register", ada(false))).await;

    let (wrong_status, wrong_body) = send(
        &app,
        json_request(
            "POST",
            "/login",
            json!({ "email": "ada@example.com", "password": "wrong horse" }),
        ),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        json_request(
            "POST",
            "/login",
            json!({ "email": "ghost@example.com", "password": "correct horse" }),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[tokio::test]
async fn test_get_count_and_delete() {
    let app = app();
    let (_, created) = send(&app, json_request("POST", "/register", ada(false))).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, empty_request("GET", &format!("/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");

    let (_, body) = send(&app, empty_request("GET", "/get/count")).await;
    assert_eq!(body["userCount"], 1);

    let (status, body) = send(&app, empty_request("DELETE", &format!("/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app, empty_request("GET", &format!("/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, empty_request("GET", "/")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, empty_request("GET", "/not-an-id")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "INVALID_OBJECT_ID");
}
