//! Repository for the `skills` table.

use atelier_core::patch::split;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::testimonial::{CreateSkill, Skill, UpdateSkill};
use crate::repositories::ordering;

const TABLE: &str = "skills";

const COLUMNS: &str = "id, name, level, category, sort_order, created_at, updated_at";

/// Provides CRUD operations for skills.
pub struct SkillRepo;

impl SkillRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY sort_order, id");
        sqlx::query_as::<_, Skill>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE name = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Insert a skill. A duplicate name violates `uq_skills_name`.
    pub async fn create(pool: &PgPool, input: &CreateSkill) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO {TABLE} (name, level, category, sort_order) \
             VALUES ($1, $2, $3, {}) \
             RETURNING {COLUMNS}",
            ordering::next_order(TABLE, 4)
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(&input.name)
            .bind(input.level)
            .bind(&input.category)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSkill,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let (category_set, category) = split(&input.category);

        let query = format!(
            "UPDATE {TABLE} SET \
                name       = COALESCE($2, name), \
                level      = COALESCE($3, level), \
                category   = CASE WHEN $4 THEN $5 ELSE category END, \
                sort_order = COALESCE($6, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.level)
            .bind(category_set)
            .bind(category)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a skill. Its `testimonial_skills` links cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM skills")
            .fetch_one(pool)
            .await
    }
}
