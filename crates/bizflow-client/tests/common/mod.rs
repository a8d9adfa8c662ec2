//! Shared fixtures for client integration tests

#![allow(dead_code)]

use bizflow_client::{HttpClient, Services, Session, Tokens};
use bizflow_core::ApiConfig;
use serde_json::{Value, json};
use wiremock::MockServer;

/// Api configuration pointing at the mock backend
pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    }
}

/// HTTP client for the mock backend
pub fn http_client(server: &MockServer, session: Session) -> HttpClient {
    HttpClient::new(&api_config(server), session).expect("client should build")
}

/// Service bundle for the mock backend
pub fn services(server: &MockServer, session: Session) -> Services {
    let http = http_client(server, session);
    Services::new(&http, &api_config(server))
}

/// Session holding an access token
pub fn logged_in(token: &str) -> Session {
    Session::with_tokens(Tokens::new(token, Some("refresh-token".to_string())))
}

/// Success envelope around `result`
pub fn envelope(result: Value) -> Value {
    json!({
        "code": 1000,
        "message": "Thành công",
        "result": result,
        "timestamp": "2025-03-01T08:00:00"
    })
}

/// Spring page around `items`
pub fn page(items: Vec<Value>) -> Value {
    let len = items.len();
    json!({
        "content": items,
        "totalElements": len,
        "totalPages": 1,
        "size": 100,
        "number": 0
    })
}

/// Product record
pub fn product_json(id: i64, sku: &str, name: &str, stock: i32) -> Value {
    json!({
        "id": id,
        "sku": sku,
        "name": name,
        "price": 95000,
        "costPrice": 80000,
        "stock": stock,
        "reorderLevel": 10,
        "status": "ACTIVE",
        "unitId": 1,
        "unitName": "bao"
    })
}

/// Staff account record
pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "fullName": "Nguyễn Văn A",
        "role": "ADMIN",
        "status": "ACTIVE"
    })
}

/// Order record
pub fn order_json(id: i64, total: i64, remaining: i64, status: &str) -> Value {
    json!({
        "id": id,
        "orderCode": format!("DH-{id:04}"),
        "totalAmount": total,
        "paidAmount": total - remaining,
        "remainingAmount": remaining,
        "status": status
    })
}
