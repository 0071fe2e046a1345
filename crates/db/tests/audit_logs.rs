//! Users, login history, and the visit log.

use atelier_core::analytics::{aggregate, Period};
use atelier_db::models::login_history::CreateLoginAttempt;
use atelier_db::models::user::{CreateUser, UpdateCredentials};
use atelier_db::models::visit::CreateVisit;
use atelier_db::repositories::{LoginHistoryRepo, UserRepo, VisitRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        name: "Admin".to_string(),
        role: "admin".to_string(),
    }
}

fn attempt(user_id: Option<i64>, email: &str, success: bool) -> CreateLoginAttempt {
    CreateLoginAttempt {
        user_id,
        email: email.to_string(),
        ip_address: Some("203.0.113.9".to_string()),
        user_agent: Some("test-agent".to_string()),
        success,
        created_at: None,
    }
}

fn visit(ip: &str, path: &str) -> CreateVisit {
    CreateVisit {
        ip_address: ip.to_string(),
        path: path.to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_by_email_overwrites(pool: PgPool) {
    let first = UserRepo::upsert_by_email(&pool, &new_user("admin@example.com"))
        .await
        .unwrap();
    let second = UserRepo::upsert_by_email(
        &pool,
        &CreateUser {
            name: "Renamed".to_string(),
            ..new_user("admin@example.com")
        },
    )
    .await
    .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Renamed");
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_first_only_succeeds_on_empty_table(pool: PgPool) {
    let user_a = new_user("a@example.com");
    let user_b = new_user("b@example.com");
    let (a, b) = tokio::join!(
        UserRepo::create_first(&pool, &user_a),
        UserRepo::create_first(&pool, &user_b),
    );
    let created = [a.unwrap(), b.unwrap()];

    assert_eq!(created.iter().filter(|u| u.is_some()).count(), 1);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);

    let later = UserRepo::create_first(&pool, &new_user("c@example.com")).await.unwrap();
    assert!(later.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_credentials_changes_only_given_fields(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("admin@example.com")).await.unwrap();
    let updated = UserRepo::update_credentials(
        &pool,
        user.id,
        &UpdateCredentials {
            name: Some("Studio Admin".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Studio Admin");
    assert_eq!(updated.email, "admin@example.com");
    assert_eq!(updated.password_hash, user.password_hash);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_is_unique_violation(pool: PgPool) {
    UserRepo::create(&pool, &new_user("a@example.com")).await.unwrap();
    let other = UserRepo::create(&pool, &new_user("b@example.com")).await.unwrap();

    let err = UserRepo::update_credentials(
        &pool,
        other.id,
        &UpdateCredentials {
            email: Some("a@example.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

// ---------------------------------------------------------------------------
// Login history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_history_pages_newest_first(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("admin@example.com")).await.unwrap();
    LoginHistoryRepo::record(&pool, &attempt(Some(user.id), "admin@example.com", false))
        .await
        .unwrap();
    LoginHistoryRepo::record(&pool, &attempt(None, "nobody@example.com", false))
        .await
        .unwrap();
    let latest = LoginHistoryRepo::record(&pool, &attempt(Some(user.id), "admin@example.com", true))
        .await
        .unwrap();

    assert_eq!(LoginHistoryRepo::count(&pool).await.unwrap(), 3);
    let page = LoginHistoryRepo::list(&pool, 2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, latest.id);

    let rest = LoginHistoryRepo::list(&pool, 2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_history_survives_user_delete(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("admin@example.com")).await.unwrap();
    LoginHistoryRepo::record(&pool, &attempt(Some(user.id), "admin@example.com", true))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let rows = LoginHistoryRepo::list_all(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, None);
    assert_eq!(rows[0].email, "admin@example.com");
}

// ---------------------------------------------------------------------------
// Visits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_visits_feed_aggregation(pool: PgPool) {
    for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.3"] {
        VisitRepo::create(&pool, &visit(ip, "/")).await.unwrap();
    }

    let rows = VisitRepo::list_since(&pool, None).await.unwrap();
    let stats = aggregate(Period::All, Utc::now(), &rows);
    assert_eq!(stats.total_visits, 3);
    assert_eq!(stats.unique_ips, 3);
    assert_eq!(stats.top_pages[0].path, "/");
    assert_eq!(stats.top_pages[0].count, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_since_filters_old_visits(pool: PgPool) {
    let old = CreateVisit {
        created_at: Some(Utc::now() - Duration::days(40)),
        ..visit("10.0.0.1", "/old")
    };
    VisitRepo::create(&pool, &old).await.unwrap();
    VisitRepo::create(&pool, &visit("10.0.0.2", "/new")).await.unwrap();

    let recent = VisitRepo::list_since(&pool, Some(Utc::now() - Duration::days(30)))
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].path, "/new");
    assert_eq!(VisitRepo::list_since(&pool, None).await.unwrap().len(), 2);
}
