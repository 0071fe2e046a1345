//! Repository for the `gallery_artworks` table.

use atelier_core::content::ReorderItem;
use atelier_core::patch::split;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::artwork::{CreateGalleryArtwork, GalleryArtwork, UpdateGalleryArtwork};
use crate::repositories::ordering::{self, ReorderOutcome};

const TABLE: &str = "gallery_artworks";

/// Column list for `gallery_artworks` queries.
const COLUMNS: &str = "\
    id, title, description, image_url, category, medium, dimensions, year, \
    sort_order, created_at, updated_at";

/// Provides CRUD operations for gallery artworks.
pub struct GalleryArtworkRepo;

impl GalleryArtworkRepo {
    /// List every artwork in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<GalleryArtwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY sort_order, id");
        sqlx::query_as::<_, GalleryArtwork>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GalleryArtwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        sqlx::query_as::<_, GalleryArtwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new artwork, appending it when no `order` is given.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryArtwork,
    ) -> Result<GalleryArtwork, sqlx::Error> {
        let query = format!(
            "INSERT INTO {TABLE} \
                (title, description, image_url, category, medium, dimensions, year, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, {}) \
             RETURNING {COLUMNS}",
            ordering::next_order(TABLE, 8)
        );
        sqlx::query_as::<_, GalleryArtwork>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.category)
            .bind(&input.medium)
            .bind(&input.dimensions)
            .bind(input.year)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Partially update an artwork. Returns `None` if the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryArtwork,
    ) -> Result<Option<GalleryArtwork>, sqlx::Error> {
        let (description_set, description) = split(&input.description);
        let (medium_set, medium) = split(&input.medium);
        let (dimensions_set, dimensions) = split(&input.dimensions);
        let (year_set, year) = split(&input.year);

        let query = format!(
            "UPDATE {TABLE} SET \
                title       = COALESCE($2, title), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                image_url   = COALESCE($5, image_url), \
                category    = COALESCE($6, category), \
                medium      = CASE WHEN $7 THEN $8 ELSE medium END, \
                dimensions  = CASE WHEN $9 THEN $10 ELSE dimensions END, \
                year        = CASE WHEN $11 THEN $12 ELSE year END, \
                sort_order  = COALESCE($13, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryArtwork>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(description_set)
            .bind(description)
            .bind(&input.image_url)
            .bind(&input.category)
            .bind(medium_set)
            .bind(medium)
            .bind(dimensions_set)
            .bind(dimensions)
            .bind(year_set)
            .bind(year)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete an artwork. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_artworks WHERE id = $1")
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
        sqlx::query_scalar("SELECT COUNT(*) FROM gallery_artworks")
            .fetch_one(pool)
            .await
    }
}
