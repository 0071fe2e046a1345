//! HTTP-level integration tests for `/api/auth`.

mod common;

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, create_admin, get, get_auth, post_json, post_json_auth, put_json_auth, send,
    token_for, ADMIN_EMAIL, ADMIN_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

use atelier_api::auth::password::hash_password;
use atelier_db::models::user::CreateUser;
use atelier_db::repositories::{LoginHistoryRepo, UserRepo};

async fn login(pool: &PgPool, email: &str, password: &str) -> axum::response::Response {
    post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/login",
        json!({"email": email, "password": password}),
    )
    .await
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_token_and_sets_cookie(pool: PgPool) {
    let admin = create_admin(&pool).await;

    let response = login(&pool, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("atelier_session="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["data"]["expiresIn"], 3600);
    assert_eq!(json["data"]["user"]["id"], admin.id);
    assert_eq!(json["data"]["user"]["email"], ADMIN_EMAIL);
    assert!(json["data"]["user"].get("passwordHash").is_none());
    assert!(json["data"]["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_email_fail_alike(pool: PgPool) {
    create_admin(&pool).await;

    let wrong = login(&pool, ADMIN_EMAIL, "not-the-password").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong.headers().get(SET_COOKIE).is_none());
    let wrong = body_json(wrong).await;

    let unknown = login(&pool, "nobody@atelier.test", ADMIN_PASSWORD).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong, unknown);
    assert_eq!(wrong["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_attempt_is_recorded(pool: PgPool) {
    let admin = create_admin(&pool).await;

    login(&pool, ADMIN_EMAIL, "nope").await;
    login(&pool, "ghost@atelier.test", "nope").await;
    login(&pool, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    assert_eq!(LoginHistoryRepo::count(&pool).await.unwrap(), 3);

    let history = LoginHistoryRepo::list(&pool, 10, 0).await.unwrap();
    assert!(history[0].success);
    assert_eq!(history[0].user_id, Some(admin.id));
    let ghost = history.iter().find(|h| h.email == "ghost@atelier.test").unwrap();
    assert!(!ghost.success);
    assert_eq!(ghost.user_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_fields_are_invalid_input(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/login",
        json!({"email": ADMIN_EMAIL}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(LoginHistoryRepo::count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_cookie_authenticates(pool: PgPool) {
    create_admin(&pool).await;
    let token = body_json(login(&pool, ADMIN_EMAIL, ADMIN_PASSWORD).await).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/auth/credentials")
        .header(COOKIE, format!("atelier_session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(common::build_test_app(pool), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], ADMIN_EMAIL);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_of_deleted_user_is_rejected(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let token = token_for(&admin);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/auth/credentials", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_reject_anonymous(pool: PgPool) {
    let app = common::build_test_app(pool);

    for uri in ["/api/auth/credentials", "/api/auth/history"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_clears_cookie(pool: PgPool) {
    let response = post_json(common::build_test_app(pool), "/api/auth/logout", json!({})).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("atelier_session="));
    assert!(cookie.contains("Max-Age=0"));
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_then_login_with_new_one(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let token = token_for(&admin);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/auth/credentials",
        json!({
            "currentPassword": ADMIN_PASSWORD,
            "newPassword": "an-even-better-passphrase",
            "name": "Curator",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Curator");

    let old = login(&pool, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
    let new = login(&pool, ADMIN_EMAIL, "an-even-better-passphrase").await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn credential_changes_are_validated(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let token = token_for(&admin);
    UserRepo::create(
        &pool,
        &CreateUser {
            email: "taken@atelier.test".into(),
            password_hash: hash_password("another-password").unwrap(),
            name: "Other".into(),
            role: "admin".into(),
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool.clone());

    let response = put_json_auth(
        app.clone(),
        "/api/auth/credentials",
        json!({"currentPassword": "wrong", "name": "X"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = put_json_auth(
        app.clone(),
        "/api/auth/credentials",
        json!({"currentPassword": ADMIN_PASSWORD, "email": "taken@atelier.test"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json_auth(
        app.clone(),
        "/api/auth/credentials",
        json!({"currentPassword": ADMIN_PASSWORD, "newPassword": "short"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        "/api/auth/credentials",
        json!({"currentPassword": ADMIN_PASSWORD, "email": "not-an-email"}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stored = UserRepo::find_by_id(&pool, admin.id).await.unwrap().unwrap();
    assert_eq!(stored.email, ADMIN_EMAIL);
    assert_eq!(stored.name, "Admin");
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_is_paged_newest_first(pool: PgPool) {
    let admin = create_admin(&pool).await;
    let token = token_for(&admin);
    for _ in 0..3 {
        login(&pool, ADMIN_EMAIL, "wrong").await;
    }
    login(&pool, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/auth/history?limit=2&offset=0",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 4);
    assert_eq!(json["data"]["limit"], 2);
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["success"], true);

    let json = body_json(
        get_auth(
            common::build_test_app(pool),
            "/api/auth/history?limit=2&offset=2",
            &token,
        )
        .await,
    )
    .await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["success"] == false));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_rejects_non_numeric_paging(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/auth/history?limit=lots",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_body_with_bearer_is_still_a_login(pool: PgPool) {
    create_admin(&pool).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/auth/login",
        json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
        "stale-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
