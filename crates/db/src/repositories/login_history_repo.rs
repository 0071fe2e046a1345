//! Repository for the append-only `login_history` table.

use sqlx::PgPool;

use crate::models::login_history::{CreateLoginAttempt, LoginHistory};

const COLUMNS: &str = "id, user_id, email, ip_address, user_agent, success, created_at";

/// Records and pages through login attempts.
pub struct LoginHistoryRepo;

impl LoginHistoryRepo {
    /// Append one attempt.
    pub async fn record(
        pool: &PgPool,
        input: &CreateLoginAttempt,
    ) -> Result<LoginHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO login_history (user_id, email, ip_address, user_agent, success, created_at) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LoginHistory>(&query)
            .bind(input.user_id)
            .bind(&input.email)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .bind(input.success)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// One page of attempts, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LoginHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM login_history \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, LoginHistory>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every attempt, oldest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<LoginHistory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM login_history ORDER BY id");
        sqlx::query_as::<_, LoginHistory>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM login_history")
            .fetch_one(pool)
            .await
    }
}
