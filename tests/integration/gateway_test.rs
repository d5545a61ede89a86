// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use breachwatch_console::domain::models::crawl_job::JobStatus;
use breachwatch_console::domain::models::principal::Role;
use breachwatch_console::infrastructure::storage::MemoryStore;
use breachwatch_console::presentation::middleware::session_middleware::SessionRegistry;
use breachwatch_console::presentation::routes::{routes, ConsoleServices};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use super::helpers::{job, spawn_remote, RemoteServer, PASSWORD};

fn gateway(remote: &RemoteServer) -> Router {
    gateway_with_sessions(remote).0
}

fn gateway_with_sessions(remote: &RemoteServer) -> (Router, Arc<SessionRegistry>) {
    let services = ConsoleServices::new(
        remote.client(),
        Arc::new(MemoryStore::new()),
        "console_session",
    );
    let registry = services.sessions.registry.clone();
    (routes(services), registry)
}

fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// 登录并返回后续请求使用的 Cookie
async fn login(app: &Router) -> String {
    login_with(app, None).await
}

/// 携带已有 Cookie 登录，返回网关签发的新 Cookie
async fn login_with(app: &Router, cookie: Option<&str>) -> String {
    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            cookie,
            Some(json!({ "email": "operator@example.com", "password": PASSWORD })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn me_status(app: &Router, cookie: &str) -> StatusCode {
    app.clone()
        .oneshot(request(Method::GET, "/api/auth/me", Some(cookie), None))
        .await
        .unwrap()
        .status()
}

fn job_form() -> Value {
    json!({
        "name": "nightly sweep",
        "settings": {
            "keywords": "password, NIK\nconfidential",
            "file_extensions": ".sql, env",
            "seed_urls": "https://example.com/forum",
            "search_queries": "",
            "use_search_engines": false
        }
    })
}

#[tokio::test]
async fn test_health_and_version_are_public() {
    let remote = spawn_remote(Role::User).await;
    let app = gateway(&remote);

    let health = app
        .clone()
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();
    let version = app
        .oneshot(request(Method::GET, "/version", None, None))
        .await
        .unwrap();

    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(version.status(), StatusCode::OK);
    assert!(remote.state.calls().is_empty());
}

#[tokio::test]
async fn test_protected_api_requires_login() {
    let remote = spawn_remote(Role::User).await;
    let app = gateway(&remote);

    let response = app
        .oneshot(request(Method::GET, "/api/jobs", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["redirect"], "/login");
}

#[tokio::test]
async fn test_bad_credentials_are_401_with_server_reason() {
    let remote = spawn_remote(Role::User).await;
    let app = gateway(&remote);

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "operator@example.com", "password": "nope" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Incorrect email or password");
}

#[tokio::test]
async fn test_create_job_sends_normalized_settings_and_mirrors_form() {
    let remote = spawn_remote(Role::User).await;
    let app = gateway(&remote);
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/api/jobs", Some(&cookie), Some(job_form())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["expected_status"], "pending");

    let sent = remote.state.created.lock()[0].clone();
    assert_eq!(sent.name.as_deref(), Some("nightly sweep"));
    assert_eq!(sent.settings.keywords, vec!["password", "NIK", "confidential"]);
    assert_eq!(sent.settings.file_extensions, vec!["sql", "env"]);
    assert!(sent.settings.search_dorks.is_empty());

    let last = app
        .oneshot(request(Method::GET, "/api/settings/last", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(last.status(), StatusCode::OK);
    let last = json_body(last).await;
    assert_eq!(last["keywords"], "password, NIK\nconfidential");
}

#[tokio::test]
async fn test_invalid_form_is_400_without_remote_call() {
    let remote = spawn_remote(Role::User).await;
    let app = gateway(&remote);
    let cookie = login(&app).await;

    let mut form = job_form();
    form["settings"]["keywords"] = json!(" , ");
    let response = app
        .oneshot(request(Method::POST, "/api/jobs", Some(&cookie), Some(form)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!remote.state.calls().contains(&"create".to_string()));
}

#[tokio::test]
async fn test_running_job_run_now_is_409_and_stop_is_forwarded() {
    let remote = spawn_remote(Role::User).await;
    let running = job(JobStatus::Running);
    let id = running.id;
    remote.state.insert(running);
    let app = gateway(&remote);
    let cookie = login(&app).await;

    let run = app
        .clone()
        .oneshot(request(
            Method::POST,
            &format!("/api/jobs/{}/run", id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(run.status(), StatusCode::CONFLICT);
    assert!(!remote.state.calls().contains(&"run".to_string()));

    let stop = app
        .oneshot(request(
            Method::POST,
            &format!("/api/jobs/{}/stop", id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(stop.status(), StatusCode::OK);
    assert!(remote.state.calls().contains(&"stop".to_string()));
    let body = json_body(stop).await;
    assert_eq!(body["status"], "stopping");
}

#[tokio::test]
async fn test_job_actions_reflect_status() {
    let remote = spawn_remote(Role::User).await;
    let completed = job(JobStatus::Completed);
    let id = completed.id;
    remote.state.insert(completed);
    let app = gateway(&remote);
    let cookie = login(&app).await;

    let response = app
        .oneshot(request(
            Method::GET,
            &format!("/api/jobs/{}/actions", id),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "completed");
    assert!(!body["actions"]
        .as_array()
        .unwrap()
        .contains(&json!("stop")));
}

#[tokio::test]
async fn test_wrong_current_password_reason_is_passed_through() {
    let remote = spawn_remote(Role::User).await;
    let app = gateway(&remote);
    let cookie = login(&app).await;

    let response = app
        .oneshot(request(
            Method::PUT,
            "/api/account/password",
            Some(&cookie),
            Some(json!({ "current_password": "wrong", "new_password": "another-secret-1" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Incorrect current password");
}

#[tokio::test]
async fn test_missing_preferences_fall_back_to_defaults() {
    let remote = spawn_remote(Role::User).await;
    let app = gateway(&remote);
    let cookie = login(&app).await;

    let response = app
        .oneshot(request(Method::GET, "/api/account/preferences", Some(&cookie), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["default_items_per_page"], 10);
}

#[tokio::test]
async fn test_admin_api_is_forbidden_for_users() {
    let remote = spawn_remote(Role::User).await;
    let app = gateway(&remote);
    let cookie = login(&app).await;

    let response = app
        .oneshot(request(Method::GET, "/api/admin/users", Some(&cookie), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["redirect"], "/dashboard");
}

#[tokio::test]
async fn test_admission_query_for_admin_page() {
    let remote = spawn_remote(Role::User).await;
    let app = gateway(&remote);

    let anonymous = app
        .clone()
        .oneshot(request(Method::GET, "/api/admission?path=/admin/users", None, None))
        .await
        .unwrap();
    let anonymous = json_body(anonymous).await;
    assert_eq!(anonymous["decision"], "redirect_to_login");
    assert_eq!(anonymous["redirect"], "/login");

    let cookie = login(&app).await;
    let user = app
        .oneshot(request(
            Method::GET,
            "/api/admission?path=/admin/users",
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    let user = json_body(user).await;
    assert_eq!(user["decision"], "redirect_to_default");
    assert_eq!(user["redirect"], "/dashboard");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let remote = spawn_remote(Role::User).await;
    let (app, registry) = gateway_with_sessions(&remote);
    let cookie = login(&app).await;
    assert_eq!(registry.len(), 1);

    let logout = app
        .clone()
        .oneshot(request(Method::POST, "/api/auth/logout", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    let cleared = logout
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cleared.starts_with("console_session=;"));
    assert!(cleared.contains("Max-Age=0"));
    assert!(registry.is_empty());

    assert_eq!(me_status(&app, &cookie).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_ignores_planted_session_id() {
    let remote = spawn_remote(Role::User).await;
    let (app, registry) = gateway_with_sessions(&remote);
    let planted = format!("console_session={}", Uuid::new_v4());

    let issued = login_with(&app, Some(&planted)).await;

    assert_ne!(issued, planted);
    assert_eq!(me_status(&app, &planted).await, StatusCode::UNAUTHORIZED);
    assert_eq!(me_status(&app, &issued).await, StatusCode::OK);
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_relogin_rotates_session_and_retires_previous_one() {
    let remote = spawn_remote(Role::User).await;
    let (app, registry) = gateway_with_sessions(&remote);
    let first = login(&app).await;

    let second = login_with(&app, Some(&first)).await;

    assert_ne!(first, second);
    assert_eq!(me_status(&app, &first).await, StatusCode::UNAUTHORIZED);
    assert_eq!(me_status(&app, &second).await, StatusCode::OK);
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_failed_login_issues_no_session() {
    let remote = spawn_remote(Role::User).await;
    let (app, registry) = gateway_with_sessions(&remote);

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "operator@example.com", "password": "nope" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_anonymous_traffic_does_not_grow_session_registry() {
    let remote = spawn_remote(Role::User).await;
    let (app, registry) = gateway_with_sessions(&remote);

    for _ in 0..20 {
        let cookie = format!("console_session={}", Uuid::new_v4());
        let response = app
            .clone()
            .oneshot(request(Method::GET, "/health", Some(&cookie), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/api/jobs", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    assert!(registry.is_empty());
}
