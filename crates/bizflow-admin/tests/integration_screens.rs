//! Integration tests for the dashboard, account, auth forms, chat and shell

mod common;

use bizflow_admin::views::{
    AccountView, ChatWidget, DashboardView, ForgotPasswordView, LoginView, RegisterView, Sender,
};
use bizflow_admin::{Gated, Route, ScreenState, Shell, messages};
use common::*;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_dashboard_data(server: &MockServer, users: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(users))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page(vec![
            product_json(1, "XM-HT", "Xi măng Hà Tiên", 5),
            product_json(2, "G-04", "Gạch ống 4 lỗ", 150),
        ]))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page(vec![
            order_json(1, 500_000, 0, "PAID"),
            order_json(2, 300_000, 100_000, "PAID_PARTIAL"),
            order_json(3, 900_000, 900_000, "CANCELLED"),
        ]))))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_dashboard_aggregates_cached_collections() {
    let server = MockServer::start().await;
    mount_dashboard_data(&server, vec![user_json(1, "admin"), user_json(2, "thu.ngan")]).await;

    let (app, _) = app(&server, Some("tok"));
    let view = DashboardView::new(&app).unwrap();

    assert_eq!(view.mount().await, Gated::Pass(()));

    let data = match view.screen() {
        ScreenState::Ready(data) => data,
        other => panic!("unexpected screen {other:?}"),
    };
    assert_eq!(data.report.total_users, 2);
    assert_eq!(data.report.total_products, 2);
    assert_eq!(data.report.low_stock_count, 1);
    assert_eq!(data.report.total_orders, 3);
    assert_eq!(data.report.total_revenue, Decimal::from(800_000));
    assert_eq!(data.report.outstanding_amount, Decimal::from(100_000));
    assert_eq!(data.staff[1].username, "thu.ngan");
    assert_eq!(data.empty_message(), None);
}

#[tokio::test]
async fn test_dashboard_without_staff_shows_placeholder() {
    let server = MockServer::start().await;
    mount_dashboard_data(&server, Vec::new()).await;

    let (app, _) = app(&server, Some("tok"));
    let view = DashboardView::new(&app).unwrap();
    view.mount().await;

    let data = view.screen();
    assert_eq!(data.data().and_then(|d| d.empty_message()), Some(messages::NO_STAFF));
}

#[tokio::test]
async fn test_dashboard_gate_skips_every_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (app, _) = app(&server, None);
    let view = DashboardView::new(&app).unwrap();

    assert_eq!(view.mount().await, Gated::Redirect(Route::Login));
    assert_eq!(view.screen(), ScreenState::Idle);
}

#[tokio::test]
async fn test_account_shows_first_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            user_json(7, "owner"),
            user_json(8, "staff")
        ]))))
        .mount(&server)
        .await;

    let (app, _) = app(&server, Some("tok"));
    let mut view = AccountView::new(&app).unwrap();
    view.mount().await;

    assert_eq!(view.screen().data().map(|u| u.username.as_str()), Some("owner"));
}

#[tokio::test]
async fn test_account_forbidden_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(failure(1007, "Access Denied")))
        .mount(&server)
        .await;

    let (app, _) = app(&server, Some("tok"));
    let mut view = AccountView::new(&app).unwrap();
    view.mount().await;

    assert_eq!(view.screen().error(), Some(messages::ACCOUNT_FORBIDDEN));
}

#[tokio::test]
async fn test_login_stores_tokens_and_goes_home() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .and(body_json(json!({ "username": "admin", "password": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "username": "admin",
            "token": "access-1",
            "refreshToken": "refresh-1"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let (app, store) = app(&server, None);
    let mut view = LoginView::new(&app);
    view.set_username("admin");
    view.set_password("123456");

    assert_eq!(view.submit().await, Some(Route::Home));
    assert!(app.session.is_authenticated());
    assert_eq!(stored(&store).access_token.as_deref(), Some("access-1"));
    assert_eq!(stored(&store).refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_login_errors_and_edit_clears_them() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .and(body_partial_json(json!({ "username": "admin" })))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(failure(1006, "Sai tên đăng nhập hoặc mật khẩu")),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .and(body_partial_json(json!({ "username": "notoken" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "username": "notoken" }))))
        .mount(&server)
        .await;

    let (app, _) = app(&server, None);
    let mut view = LoginView::new(&app);
    view.set_username("admin");
    view.set_password("wrong-pass");

    assert_eq!(view.submit().await, None);
    assert_eq!(view.error(), Some("Sai tên đăng nhập hoặc mật khẩu"));

    view.set_username("notoken");
    assert_eq!(view.error(), None);

    assert_eq!(view.submit().await, None);
    assert_eq!(view.error(), Some(messages::LOGIN_NO_TOKEN));
    assert!(!app.session.is_authenticated());
}

#[tokio::test]
async fn test_register_mismatch_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(0)
        .mount(&server)
        .await;

    let (app, _) = app(&server, None);
    let mut view = RegisterView::new(&app);
    view.form.full_name = "Lê Thị Bình".to_string();
    view.form.username = "binh.le".to_string();
    view.form.password = "secret1".to_string();
    view.form.confirm_password = "secret2".to_string();

    assert_eq!(view.submit().await, None);
    assert_eq!(view.error(), Some(messages::PASSWORD_MISMATCH));
}

#[tokio::test]
async fn test_register_success_returns_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/register"))
        .and(body_partial_json(json!({ "username": "binh.le", "fullName": "Lê Thị Bình" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "id": 12 }))))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _) = app(&server, None);
    let mut view = RegisterView::new(&app);
    view.form.full_name = "Lê Thị Bình".to_string();
    view.form.username = "binh.le".to_string();
    view.form.password = "secret1".to_string();
    view.form.confirm_password = "secret1".to_string();

    assert_eq!(view.submit().await, Some(Route::Login));
    assert_eq!(view.success(), Some(messages::REGISTER_SUCCESS));
}

#[tokio::test]
async fn test_forgot_password_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/forgot-password"))
        .and(body_json(json!({ "email": "an@bizflow.vn" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/forgot-password"))
        .respond_with(ResponseTemplate::new(404).set_body_json(failure(1005, "Không tìm thấy")))
        .mount(&server)
        .await;

    let (app, _) = app(&server, None);
    let mut view = ForgotPasswordView::new(&app);

    view.set_email("an@bizflow.vn");
    assert_eq!(view.submit().await, Ok(messages::FORGOT_SUCCESS));

    view.set_email("ghost@bizflow.vn");
    assert_eq!(view.submit().await, Err(messages::FORGOT_FAILED));
    assert_eq!(view.outcome(), Some(Err(messages::FORGOT_FAILED)));
}

#[tokio::test]
async fn test_chat_through_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/chat"))
        .and(body_json(json!({ "prompt": "Đơn nào còn nợ?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "Đơn DH-0002." })))
        .mount(&server)
        .await;

    let (app, _) = app(&server, Some("tok"));
    let mut widget = ChatWidget::new(app.assistant());
    widget.set_input("Đơn nào còn nợ?");

    assert!(widget.send().await);
    let last = widget.messages().last().unwrap();
    assert_eq!(last.sender, Sender::Bot);
    assert_eq!(last.text, "Đơn DH-0002.");
}

#[tokio::test]
async fn test_shell_menu_and_logout() {
    let server = MockServer::start().await;
    let (app, store) = app(&server, Some("tok"));
    let mut shell = Shell::new(app.auth.clone(), "/dashboard/products");

    let active: Vec<&str> = shell
        .menu()
        .into_iter()
        .filter(|(_, active)| *active)
        .map(|(item, _)| item.title)
        .collect();
    assert_eq!(active, vec!["Sản phẩm"]);

    assert_eq!(shell.logout().unwrap(), Route::Login);
    assert_eq!(shell.current_path(), "/auth/login");
    assert!(!app.session.is_authenticated());
    assert_eq!(stored(&store).access_token, None);
}
