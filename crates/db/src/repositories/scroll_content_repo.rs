//! Repository for the `scroll_contents` table.

use atelier_core::content::ReorderItem;
use atelier_core::patch::split;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::artwork::{CreateScrollContent, ScrollContent, UpdateScrollContent};
use crate::repositories::ordering::{self, ReorderOutcome};

const TABLE: &str = "scroll_contents";

const COLUMNS: &str = "\
    id, title, subtitle, body, image_url, sort_order, created_at, updated_at";

/// Provides CRUD operations for scroll story sections.
pub struct ScrollContentRepo;

impl ScrollContentRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<ScrollContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY sort_order, id");
        sqlx::query_as::<_, ScrollContent>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ScrollContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        sqlx::query_as::<_, ScrollContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateScrollContent,
    ) -> Result<ScrollContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO {TABLE} (title, subtitle, body, image_url, sort_order) \
             VALUES ($1, $2, $3, $4, {}) \
             RETURNING {COLUMNS}",
            ordering::next_order(TABLE, 5)
        );
        sqlx::query_as::<_, ScrollContent>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.body)
            .bind(&input.image_url)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScrollContent,
    ) -> Result<Option<ScrollContent>, sqlx::Error> {
        let (subtitle_set, subtitle) = split(&input.subtitle);
        let (image_set, image_url) = split(&input.image_url);

        let query = format!(
            "UPDATE {TABLE} SET \
                title      = COALESCE($2, title), \
                subtitle   = CASE WHEN $3 THEN $4 ELSE subtitle END, \
                body       = COALESCE($5, body), \
                image_url  = CASE WHEN $6 THEN $7 ELSE image_url END, \
                sort_order = COALESCE($8, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScrollContent>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(subtitle_set)
            .bind(subtitle)
            .bind(&input.body)
            .bind(image_set)
            .bind(image_url)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scroll_contents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn reorder(
        pool: &PgPool,
        items: &[ReorderItem],
    ) -> Result<ReorderOutcome, sqlx::Error> {
        ordering::reorder(pool, TABLE, items).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM scroll_contents")
            .fetch_one(pool)
            .await
    }
}
