//! Repository for the `social_links` table.

use atelier_core::content::ReorderItem;
use atelier_core::patch::split;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::social_link::{CreateSocialLink, SocialLink, UpdateSocialLink};
use crate::repositories::ordering::{self, ReorderOutcome};

const TABLE: &str = "social_links";

const COLUMNS: &str = "id, platform, url, icon, sort_order, created_at, updated_at";

/// Provides CRUD operations for social profile links.
pub struct SocialLinkRepo;

impl SocialLinkRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<SocialLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY sort_order, id");
        sqlx::query_as::<_, SocialLink>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SocialLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        sqlx::query_as::<_, SocialLink>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateSocialLink) -> Result<SocialLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO {TABLE} (platform, url, icon, sort_order) \
             VALUES ($1, $2, $3, {}) \
             RETURNING {COLUMNS}",
            ordering::next_order(TABLE, 4)
        );
        sqlx::query_as::<_, SocialLink>(&query)
            .bind(&input.platform)
            .bind(&input.url)
            .bind(&input.icon)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSocialLink,
    ) -> Result<Option<SocialLink>, sqlx::Error> {
        let (icon_set, icon) = split(&input.icon);

        let query = format!(
            "UPDATE {TABLE} SET \
                platform   = COALESCE($2, platform), \
                url        = COALESCE($3, url), \
                icon       = CASE WHEN $4 THEN $5 ELSE icon END, \
                sort_order = COALESCE($6, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SocialLink>(&query)
            .bind(id)
            .bind(&input.platform)
            .bind(&input.url)
            .bind(icon_set)
            .bind(icon)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM social_links WHERE id = $1")
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
        sqlx::query_scalar("SELECT COUNT(*) FROM social_links")
            .fetch_one(pool)
            .await
    }
}
