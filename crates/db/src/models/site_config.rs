//! Site configuration singletons.

use serde::Serialize;
use sqlx::FromRow;
use atelier_core::types::Timestamp;

/// A row from the `site_configs` table: one JSON document per config kind.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub key: String,
    pub content: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
