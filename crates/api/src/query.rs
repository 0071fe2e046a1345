//! Shared query parameter types for API handlers.

use atelier_core::types::DbId;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?type=&id=` on collection endpoints that serve several tables.
#[derive(Debug, Default, Deserialize)]
pub struct CollectionParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<DbId>,
}

/// `?id=` on single-table collection endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<DbId>,
}

/// `?id=&active=` on the ad banner endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct BannerParams {
    pub id: Option<DbId>,
    pub active: Option<bool>,
}

/// `?period=` on the analytics endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub period: Option<String>,
}
