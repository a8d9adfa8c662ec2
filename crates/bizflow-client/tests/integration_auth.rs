//! Integration tests for login, logout and token persistence

mod common;

use bizflow_client::services::AuthService;
use bizflow_client::{
    AuthProvider, ClientError, FileTokenStore, MemoryTokenStore, Session, TokenStore, Tokens,
};
use bizflow_core::types::LoginRequest;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer, session: &Session, store: Arc<dyn TokenStore>) -> AuthProvider {
    let http = http_client(server, session.clone());
    AuthProvider::new(AuthService::new(http), session.clone(), store)
}

fn credentials() -> LoginRequest {
    LoginRequest {
        username: "admin".to_string(),
        password: "123456".to_string(),
    }
}

#[tokio::test]
async fn test_login_stores_both_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .and(body_json(json!({ "username": "admin", "password": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "userId": 1,
            "username": "admin",
            "role": "ADMIN",
            "token": "access-abc",
            "refreshToken": "refresh-xyz"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileTokenStore::new(dir.path().join("session.json")));
    let session = Session::new();
    let auth = provider(&server, &session, store.clone());

    let response = auth.login(&credentials()).await.unwrap();

    assert_eq!(response.role.as_deref(), Some("ADMIN"));
    assert_eq!(session.access_token().as_deref(), Some("access-abc"));
    assert_eq!(session.refresh_token().as_deref(), Some("refresh-xyz"));
    assert_eq!(
        store.load().unwrap(),
        Tokens::new("access-abc", Some("refresh-xyz".to_string()))
    );
}

#[tokio::test]
async fn test_login_without_token_is_missing_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "username": "admin" }))),
        )
        .mount(&server)
        .await;

    let session = Session::new();
    let store = Arc::new(MemoryTokenStore::new());
    let auth = provider(&server, &session, store.clone());

    let err = auth.login(&credentials()).await.unwrap_err();

    assert!(matches!(err, ClientError::MissingResult));
    assert!(!session.is_authenticated());
    assert!(!store.load().unwrap().has_access_token());
}

#[tokio::test]
async fn test_rejected_login_keeps_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 1006,
            "message": "Sai tên đăng nhập hoặc mật khẩu"
        })))
        .mount(&server)
        .await;

    let session = Session::new();
    let auth = provider(&server, &session, Arc::new(MemoryTokenStore::new()));

    let err = auth.login(&credentials()).await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized { .. }));
    assert_eq!(
        err.server_message().as_deref(),
        Some("Sai tên đăng nhập hoặc mật khẩu")
    );
}

#[tokio::test]
async fn test_restore_then_logout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/auth/me"))
        .and(header("authorization", "Bearer persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(user_json(1, "admin"))))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_tokens(Tokens::new("persisted", None)));
    let session = Session::new();
    let http = http_client(&server, session.clone());
    let auth = AuthProvider::new(AuthService::new(http.clone()), session.clone(), store.clone());

    assert!(auth.restore().unwrap());
    let me = AuthService::new(http).me().await.unwrap().result.unwrap();
    assert_eq!(me.username, "admin");

    auth.logout().unwrap();
    assert!(!session.is_authenticated());
    assert_eq!(store.load().unwrap(), Tokens::default());
}

#[tokio::test]
async fn test_unauthorized_response_does_not_log_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = logged_in("expired");
    let services = services(&server, session.clone());

    let err = services.products.list_products().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token_when_not_rotated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "refresh-token" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "token": "fresh" }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = logged_in("stale");
    let store = Arc::new(MemoryTokenStore::new());
    let auth = provider(&server, &session, store.clone());

    auth.refresh().await.unwrap();

    assert_eq!(session.access_token().as_deref(), Some("fresh"));
    assert_eq!(session.refresh_token().as_deref(), Some("refresh-token"));
    assert_eq!(store.load().unwrap().access_token.as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_refresh_without_refresh_token_fails_locally() {
    let server = MockServer::start().await;
    let session = Session::with_tokens(Tokens::new("only-access", None));
    let auth = provider(&server, &session, Arc::new(MemoryTokenStore::new()));

    let err = auth.refresh().await.unwrap_err();

    assert!(matches!(err, ClientError::Session { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
