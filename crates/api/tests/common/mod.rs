#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use atelier_api::auth::jwt::{generate_token, JwtConfig};
use atelier_api::auth::password::hash_password;
use atelier_api::config::ServerConfig;
use atelier_api::geo::{GeoConfig, GeoLookup, NoopGeoLookup};
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_db::models::user::{CreateUser, User};
use atelier_db::repositories::UserRepo;

pub const TEST_INIT_SECRET: &str = "test-init-secret";
pub const ADMIN_EMAIL: &str = "admin@atelier.test";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Geolocation is disabled; tests that need it swap in their own lookup via
/// [`build_test_app_with_geo`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        init_secret: Some(TEST_INIT_SECRET.to_string()),
        cookie_secure: false,
        bootstrap_admin: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            expiry_hours: 1,
        },
        geo: GeoConfig {
            enabled: false,
            ..GeoConfig::default()
        },
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config(), Arc::new(NoopGeoLookup))
}

pub fn build_test_app_with_geo(pool: PgPool, geo: Arc<dyn GeoLookup>) -> Router {
    build_test_app_with(pool, test_config(), geo)
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig, geo: Arc<dyn GeoLookup>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        geo,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert the administrator directly.
pub async fn create_admin(pool: &PgPool) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: ADMIN_EMAIL.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
            name: "Admin".to_string(),
            role: "admin".to_string(),
        },
    )
    .await
    .expect("admin creation should succeed")
}

/// A valid session token for `user` under [`test_config`].
pub fn token_for(user: &User) -> String {
    generate_token(user.id, &user.role, &test_config().jwt).expect("token generation")
}

/// Create the admin and return a token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    token_for(&create_admin(pool).await)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, &body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), &body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, None, &body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), &body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, Some(token), &body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, None)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}
