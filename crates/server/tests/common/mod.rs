#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use folio_server::config::{Config, NotifyFailurePolicy};
use folio_server::db::Database;
use folio_server::routes::auth::hash_password;
use folio_server::services::mailer::{Notification, Notifier, NotifyError};
use folio_server::AppState;
use serde_json::Value;
use tower::util::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "changeme";

/// Notifier double that records every attempt and optionally fails.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
    pub fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(NotifyError::Transport("relay unavailable".to_string()));
        }
        Ok(())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub app: axum::Router,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn test_config(policy: NotifyFailurePolicy) -> Config {
    Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        static_path: "./static".to_string(),
        media_path: "./media".to_string(),
        jwt_secret: "test-secret".to_string(),
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password_hash: Some(hash_password(ADMIN_PASSWORD).expect("password should hash")),
        contact_email: "owner@example.com".to_string(),
        default_from_email: "noreply@example.com".to_string(),
        smtp: None,
        notify_failure: policy,
    }
}

pub async fn build_test_context() -> TestContext {
    build_test_context_with(false, NotifyFailurePolicy::Fail).await
}

pub async fn build_test_context_with(fail_notifications: bool, policy: NotifyFailurePolicy) -> TestContext {
    let db = Database::in_memory().await.expect("database should open");
    let notifier = Arc::new(RecordingNotifier {
        fail: fail_notifications,
        ..Default::default()
    });
    let state = AppState::new(db, test_config(policy), notifier.clone()).expect("state should build");
    let app = folio_server::app(state.clone());

    TestContext {
        state,
        app,
        notifier,
    }
}

pub async fn request_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let resp = app.clone().oneshot(req).await.expect("router should respond");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn get_page(app: &axum::Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    let resp = app.clone().oneshot(req).await.expect("router should respond");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// Returns status, body text and the `Location` header if any.
pub async fn post_form(
    app: &axum::Router,
    uri: &str,
    fields: &[(&str, &str)],
) -> (StatusCode, String, Option<String>) {
    let body = serde_urlencoded::to_string(fields).expect("form should encode");
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request should build");
    let resp = app.clone().oneshot(req).await.expect("router should respond");
    let status = resp.status();
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    (status, String::from_utf8_lossy(&bytes).into_owned(), location)
}

pub async fn login_and_get_token(app: &axum::Router) -> String {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}
