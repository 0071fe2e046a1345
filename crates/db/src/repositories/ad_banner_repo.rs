//! Repository for the `ad_banners` table.

use atelier_core::patch::split;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::ad_banner::{AdBanner, CreateAdBanner, UpdateAdBanner};
use crate::repositories::ordering;

const TABLE: &str = "ad_banners";

const COLUMNS: &str = "\
    id, title, description, image_url, link_url, button_text, is_active, \
    sort_order, created_at, updated_at";

/// Provides CRUD operations for promotional banners.
pub struct AdBannerRepo;

impl AdBannerRepo {
    /// List every banner, active or not, in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<AdBanner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY sort_order, id");
        sqlx::query_as::<_, AdBanner>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdBanner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        sqlx::query_as::<_, AdBanner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateAdBanner) -> Result<AdBanner, sqlx::Error> {
        let query = format!(
            "INSERT INTO {TABLE} \
                (title, description, image_url, link_url, button_text, is_active, sort_order) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true), {}) \
             RETURNING {COLUMNS}",
            ordering::next_order(TABLE, 7)
        );
        sqlx::query_as::<_, AdBanner>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(&input.button_text)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdBanner,
    ) -> Result<Option<AdBanner>, sqlx::Error> {
        let (description_set, description) = split(&input.description);
        let (image_set, image_url) = split(&input.image_url);
        let (link_set, link_url) = split(&input.link_url);
        let (button_set, button_text) = split(&input.button_text);

        let query = format!(
            "UPDATE {TABLE} SET \
                title       = COALESCE($2, title), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                image_url   = CASE WHEN $5 THEN $6 ELSE image_url END, \
                link_url    = CASE WHEN $7 THEN $8 ELSE link_url END, \
                button_text = CASE WHEN $9 THEN $10 ELSE button_text END, \
                is_active   = COALESCE($11, is_active), \
                sort_order  = COALESCE($12, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdBanner>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(description_set)
            .bind(description)
            .bind(image_set)
            .bind(image_url)
            .bind(link_set)
            .bind(link_url)
            .bind(button_set)
            .bind(button_text)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ad_banners WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM ad_banners")
            .fetch_one(pool)
            .await
    }
}
