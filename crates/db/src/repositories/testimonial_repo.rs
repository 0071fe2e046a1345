//! Repository for the `testimonials` and `testimonial_skills` tables.
//!
//! Reads always return testimonials with their highlighted skills attached.
//! Writes that touch both tables run in one transaction.

use std::collections::HashMap;

use atelier_core::patch::split;
use atelier_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::testimonial::{
    CreateTestimonial, SkillRef, Testimonial, TestimonialWithSkills, UpdateTestimonial,
};
use crate::repositories::ordering;

const TABLE: &str = "testimonials";

const COLUMNS: &str = "\
    id, name, role, company, content, rating, avatar_url, sort_order, \
    created_at, updated_at";

/// Provides CRUD operations for testimonials and their skill links.
pub struct TestimonialRepo;

impl TestimonialRepo {
    /// List every testimonial in display order, with highlighted skills.
    pub async fn list(pool: &PgPool) -> Result<Vec<TestimonialWithSkills>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY sort_order, id");
        let rows = sqlx::query_as::<_, Testimonial>(&query)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = rows.iter().map(|t| t.id).collect();
        let mut skills = load_skills(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|testimonial| TestimonialWithSkills {
                skills_highlighted: skills.remove(&testimonial.id).unwrap_or_default(),
                testimonial,
            })
            .collect())
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TestimonialWithSkills>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1");
        let row = sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(testimonial) => {
                let mut skills = load_skills(pool, &[testimonial.id]).await?;
                Ok(Some(TestimonialWithSkills {
                    skills_highlighted: skills.remove(&testimonial.id).unwrap_or_default(),
                    testimonial,
                }))
            }
            None => Ok(None),
        }
    }

    /// Insert a testimonial and link its skills.
    ///
    /// An unknown skill id violates the join table's foreign key and rolls
    /// the whole insert back.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTestimonial,
    ) -> Result<TestimonialWithSkills, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO {TABLE} \
                (name, role, company, content, rating, avatar_url, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, {}) \
             RETURNING {COLUMNS}",
            ordering::next_order(TABLE, 7)
        );
        let testimonial = sqlx::query_as::<_, Testimonial>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.company)
            .bind(&input.content)
            .bind(input.rating)
            .bind(&input.avatar_url)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        set_skills(&mut tx, testimonial.id, &input.skill_ids).await?;
        let mut skills = load_skills(&mut *tx, &[testimonial.id]).await?;

        tx.commit().await?;
        Ok(TestimonialWithSkills {
            skills_highlighted: skills.remove(&testimonial.id).unwrap_or_default(),
            testimonial,
        })
    }

    /// Partially update a testimonial. A present `skill_ids` replaces the
    /// whole link set. Returns `None` if the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<TestimonialWithSkills>, sqlx::Error> {
        let (role_set, role) = split(&input.role);
        let (company_set, company) = split(&input.company);
        let (avatar_set, avatar_url) = split(&input.avatar_url);

        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE {TABLE} SET \
                name       = COALESCE($2, name), \
                role       = CASE WHEN $3 THEN $4 ELSE role END, \
                company    = CASE WHEN $5 THEN $6 ELSE company END, \
                content    = COALESCE($7, content), \
                rating     = COALESCE($8, rating), \
                avatar_url = CASE WHEN $9 THEN $10 ELSE avatar_url END, \
                sort_order = COALESCE($11, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(role_set)
            .bind(role)
            .bind(company_set)
            .bind(company)
            .bind(&input.content)
            .bind(input.rating)
            .bind(avatar_set)
            .bind(avatar_url)
            .bind(input.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(testimonial) = row else {
            return Ok(None);
        };

        if let Some(ref skill_ids) = input.skill_ids {
            sqlx::query("DELETE FROM testimonial_skills WHERE testimonial_id = $1")
                .bind(testimonial.id)
                .execute(&mut *tx)
                .await?;
            set_skills(&mut tx, testimonial.id, skill_ids).await?;
        }
        let mut skills = load_skills(&mut *tx, &[testimonial.id]).await?;

        tx.commit().await?;
        Ok(Some(TestimonialWithSkills {
            skills_highlighted: skills.remove(&testimonial.id).unwrap_or_default(),
            testimonial,
        }))
    }

    /// Delete a testimonial. Its skill links cascade; the skills remain.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM testimonials")
            .fetch_one(pool)
            .await
    }
}

/// Link `skill_ids` to a testimonial. Duplicate ids collapse to one link.
async fn set_skills(
    conn: &mut PgConnection,
    testimonial_id: DbId,
    skill_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    if skill_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO testimonial_skills (testimonial_id, skill_id) \
         SELECT $1, UNNEST($2::bigint[]) \
         ON CONFLICT DO NOTHING",
    )
    .bind(testimonial_id)
    .bind(skill_ids)
    .execute(conn)
    .await?;
    Ok(())
}

/// Highlighted skills for each testimonial id, in skill display order.
async fn load_skills<'e, E>(
    executor: E,
    testimonial_ids: &[DbId],
) -> Result<HashMap<DbId, Vec<SkillRef>>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    if testimonial_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(DbId, DbId, String)> = sqlx::query_as(
        "SELECT ts.testimonial_id, s.id, s.name \
         FROM testimonial_skills ts \
         JOIN skills s ON s.id = ts.skill_id \
         WHERE ts.testimonial_id = ANY($1) \
         ORDER BY s.sort_order, s.id",
    )
    .bind(testimonial_ids)
    .fetch_all(executor)
    .await?;

    let mut grouped: HashMap<DbId, Vec<SkillRef>> = HashMap::new();
    for (testimonial_id, id, name) in rows {
        grouped
            .entry(testimonial_id)
            .or_default()
            .push(SkillRef { id, name });
    }
    Ok(grouped)
}
