//! Shared fixtures for admin integration tests

#![allow(dead_code)]

use bizflow_admin::App;
use bizflow_client::{MemoryTokenStore, TokenStore, Tokens};
use bizflow_core::{ApiConfig, Config};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::MockServer;

/// Configuration pointing at the mock backend
pub fn config(server: &MockServer) -> Config {
    Config {
        api: ApiConfig {
            base_url: server.uri(),
            ..ApiConfig::default()
        },
        ..Config::default()
    }
}

/// Context over an in-memory token store, signed in when `token` is given
pub fn app(server: &MockServer, token: Option<&str>) -> (App, Arc<MemoryTokenStore>) {
    let store = Arc::new(token.map_or_else(MemoryTokenStore::new, |token| {
        MemoryTokenStore::with_tokens(Tokens::new(token, Some("refresh-token".to_string())))
    }));
    let app = App::new(config(server), store.clone()).expect("context should build");
    app.auth.restore().expect("memory store never fails");
    (app, store)
}

/// Stored tokens
pub fn stored(store: &MemoryTokenStore) -> Tokens {
    store.load().expect("memory store never fails")
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

/// Failure envelope with an HTTP error status
pub fn failure(code: i32, message: &str) -> Value {
    json!({ "code": code, "message": message })
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
