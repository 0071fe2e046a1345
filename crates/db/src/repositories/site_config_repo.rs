//! Repository for the `site_configs` key/value table.
//!
//! The config kind is the primary key, so every write is an upsert and
//! there is never more than one row per kind.

use serde_json::Value;
use sqlx::{PgExecutor, PgPool};

use crate::models::site_config::SiteConfig;

const COLUMNS: &str = "key, content, created_at, updated_at";

/// Reads and writes the site configuration documents.
pub struct SiteConfigRepo;

impl SiteConfigRepo {
    pub async fn find(pool: &PgPool, key: &str) -> Result<Option<SiteConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_configs WHERE key = $1");
        sqlx::query_as::<_, SiteConfig>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Return the stored document, inserting `default` first if none exists.
    pub async fn get_or_create(
        pool: &PgPool,
        key: &str,
        default: &Value,
    ) -> Result<SiteConfig, sqlx::Error> {
        sqlx::query(
            "INSERT INTO site_configs (key, content) VALUES ($1, $2) \
             ON CONFLICT (key) DO NOTHING",
        )
        .bind(key)
        .bind(default)
        .execute(pool)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM site_configs WHERE key = $1");
        sqlx::query_as::<_, SiteConfig>(&query)
            .bind(key)
            .fetch_one(pool)
            .await
    }

    /// Replace the document for `key`, creating the row if needed.
    pub async fn upsert(pool: &PgPool, key: &str, content: &Value) -> Result<SiteConfig, sqlx::Error> {
        upsert_with(pool, key, content).await
    }

    /// Read-modify-write under a row lock.
    ///
    /// `merge` receives the stored document (or `default` when the row does
    /// not exist yet) and returns the document to store. An error from
    /// `merge` aborts without writing.
    pub async fn merge<F, E>(
        pool: &PgPool,
        key: &str,
        default: Value,
        merge: F,
    ) -> Result<SiteConfig, E>
    where
        F: FnOnce(&Value) -> Result<Value, E>,
        E: From<sqlx::Error>,
    {
        let mut tx = pool.begin().await?;

        let current: Option<Value> =
            sqlx::query_scalar("SELECT content FROM site_configs WHERE key = $1 FOR UPDATE")
                .bind(key)
                .fetch_optional(&mut *tx)
                .await?;

        let next = merge(&current.unwrap_or(default))?;
        let saved = upsert_with(&mut *tx, key, &next).await?;

        tx.commit().await?;
        Ok(saved)
    }

    /// Every stored document, ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<SiteConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_configs ORDER BY key");
        sqlx::query_as::<_, SiteConfig>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM site_configs")
            .fetch_one(pool)
            .await
    }
}

async fn upsert_with<'e, E>(executor: E, key: &str, content: &Value) -> Result<SiteConfig, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        "INSERT INTO site_configs (key, content) VALUES ($1, $2) \
         ON CONFLICT (key) DO UPDATE SET content = EXCLUDED.content \
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, SiteConfig>(&query)
        .bind(key)
        .bind(content)
        .fetch_one(executor)
        .await
}
