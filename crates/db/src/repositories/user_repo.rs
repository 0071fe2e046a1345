//! Repository for the `users` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateCredentials, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, name, role, created_at, updated_at";

/// Advisory lock key serializing first-account creation.
const FIRST_USER_LOCK: i64 = 0x6174_656c_6965_72;

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Insert `input` only while the table is still empty. `None` means
    /// another account already exists.
    ///
    /// The check and the insert run under a transaction-scoped advisory lock,
    /// so concurrent callers cannot both create a first account.
    pub async fn create_first(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(FIRST_USER_LOCK)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO users (email, password_hash, name, role)
             SELECT $1, $2, $3, $4
             WHERE NOT EXISTS (SELECT 1 FROM users)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.role)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Insert a user or overwrite the existing row with the same email.
    pub async fn upsert_by_email(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name, role)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_users_email DO UPDATE SET
                 password_hash = EXCLUDED.password_hash,
                 name          = EXCLUDED.name,
                 role          = EXCLUDED.role
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Apply self-service account changes. Only `Some` fields are written.
    ///
    /// A taken email violates `uq_users_email`.
    pub async fn update_credentials(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCredentials,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                 email         = COALESCE($2, email),
                 name          = COALESCE($3, name),
                 password_hash = COALESCE($4, password_hash)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }
}
