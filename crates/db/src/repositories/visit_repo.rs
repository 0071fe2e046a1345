//! Repository for the append-only `visits` table.

use atelier_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::visit::{CreateVisit, Visit};

const COLUMNS: &str = "\
    id, ip_address, user_agent, path, referrer, country, region, city, created_at";

/// Appends and scans page visits.
pub struct VisitRepo;

impl VisitRepo {
    pub async fn create(pool: &PgPool, input: &CreateVisit) -> Result<Visit, sqlx::Error> {
        let query = format!(
            "INSERT INTO visits \
                (ip_address, user_agent, path, referrer, country, region, city, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .bind(&input.path)
            .bind(&input.referrer)
            .bind(&input.country)
            .bind(&input.region)
            .bind(&input.city)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Every visit at or after `since` (all visits when `None`), oldest first.
    pub async fn list_since(
        pool: &PgPool,
        since: Option<Timestamp>,
    ) -> Result<Vec<Visit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visits \
             WHERE $1::timestamptz IS NULL OR created_at >= $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM visits")
            .fetch_one(pool)
            .await
    }
}
