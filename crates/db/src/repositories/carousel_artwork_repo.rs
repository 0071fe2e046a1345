//! Repository for the `carousel_artworks` table.

use atelier_core::content::ReorderItem;
use atelier_core::patch::split;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::artwork::{CarouselArtwork, CreateCarouselArtwork, UpdateCarouselArtwork};
use crate::repositories::ordering::{self, ReorderOutcome};

const TABLE: &str = "carousel_artworks";

const COLUMNS: &str = "\
    id, title, image_url, caption, link_url, sort_order, created_at, updated_at";

/// Provides CRUD operations for carousel slides.
pub struct CarouselArtworkRepo;

impl CarouselArtworkRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<CarouselArtwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY sort_order, id");
        sqlx::query_as::<_, CarouselArtwork>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CarouselArtwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        sqlx::query_as::<_, CarouselArtwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateCarouselArtwork,
    ) -> Result<CarouselArtwork, sqlx::Error> {
        let query = format!(
            "INSERT INTO {TABLE} (title, image_url, caption, link_url, sort_order) \
             VALUES ($1, $2, $3, $4, {}) \
             RETURNING {COLUMNS}",
            ordering::next_order(TABLE, 5)
        );
        sqlx::query_as::<_, CarouselArtwork>(&query)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.caption)
            .bind(&input.link_url)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCarouselArtwork,
    ) -> Result<Option<CarouselArtwork>, sqlx::Error> {
        let (caption_set, caption) = split(&input.caption);
        let (link_set, link_url) = split(&input.link_url);

        let query = format!(
            "UPDATE {TABLE} SET \
                title      = COALESCE($2, title), \
                image_url  = COALESCE($3, image_url), \
                caption    = CASE WHEN $4 THEN $5 ELSE caption END, \
                link_url   = CASE WHEN $6 THEN $7 ELSE link_url END, \
                sort_order = COALESCE($8, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CarouselArtwork>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(caption_set)
            .bind(caption)
            .bind(link_set)
            .bind(link_url)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM carousel_artworks WHERE id = $1")
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
        sqlx::query_scalar("SELECT COUNT(*) FROM carousel_artworks")
            .fetch_one(pool)
            .await
    }
}
