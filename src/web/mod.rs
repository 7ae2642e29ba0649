//! HTTP surface: catalog page and the password-gated admin area.

pub mod session;

use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::{ServeDir, ServeFile}, trace::TraceLayer};
use validator::Validate;

use crate::config::Config;
pub use session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionStore::new(config.session_ttl());
        Self { config: Arc::new(config), sessions }
    }
}

pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "storefront"})) }))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route("/admin-login.html", get(|| async { Redirect::to("/admin-login") }))
        .route("/admin-login", get(login_page).post(login))
        .route("/admin.html", get(|| async { Redirect::to("/admin") }))
        .route("/admin", get(admin_page))
        .route("/admin-logout", get(logout))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

async fn authenticated(state: &AppState, headers: &HeaderMap) -> bool {
    match session::session_id(headers) {
        Some(id) => state.sessions.is_authenticated(id).await,
        None => false,
    }
}

async fn login_page(State(s): State<AppState>, headers: HeaderMap) -> Response {
    if authenticated(&s, &headers).await { return Redirect::to("/admin").into_response(); }
    page(&s.config.pages_dir.join("admin-login.html")).await
}

async fn login(
    State(s): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let ip = peer.map(|ConnectInfo(addr)| addr.ip().to_string()).unwrap_or_else(|| "unknown".into());
    if form.validate().is_err() || form.password != s.config.admin_password {
        tracing::warn!(%ip, "failed admin login");
        return (StatusCode::UNAUTHORIZED, Html(LOGIN_FAILED_PAGE)).into_response();
    }

    let id = s.sessions.create_authenticated().await;
    tracing::info!(%ip, "admin logged in");
    let cookie = session::set_cookie(id, s.sessions.ttl());
    ([(header::SET_COOKIE, cookie)], Redirect::to("/admin")).into_response()
}

async fn admin_page(State(s): State<AppState>, headers: HeaderMap) -> Response {
    if !authenticated(&s, &headers).await { return Redirect::to("/admin-login").into_response(); }
    page(&s.config.pages_dir.join("admin.html")).await
}

async fn logout(State(s): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session::session_id(&headers) {
        s.sessions.destroy(id).await;
        tracing::info!("admin logged out");
    }
    ([(header::SET_COOKIE, session::clear_cookie())], Redirect::to("/admin-login")).into_response()
}

async fn page(path: &Path) -> Response {
    match tokio::fs::read_to_string(path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "page unavailable");
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

const LOGIN_FAILED_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Login failed</title>
    <style>
        body { font-family: Arial, sans-serif; text-align: center; margin-top: 50px; background: #000; color: #fff; }
        .error { padding: 20px; margin: 20px; border: 1px solid #ff4444; }
        a { color: #667eea; text-decoration: none; }
    </style>
</head>
<body>
    <div class="error">
        <h2>Wrong password</h2>
        <p><a href="/admin-login">Try again</a></p>
    </div>
</body>
</html>
"#;
