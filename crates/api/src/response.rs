//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Public content reads
//! add a `source` marker so callers can tell live data from the built-in
//! fallback payload.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Where a public read got its payload from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Database,
    Fallback,
}

/// `{ "data": T, "source": "database" | "fallback" }` envelope for public reads.
#[derive(Debug, Serialize)]
pub struct ContentResponse<T: Serialize> {
    pub data: T,
    pub source: ContentSource,
}

impl<T: Serialize> ContentResponse<T> {
    pub fn database(data: T) -> Self {
        Self {
            data,
            source: ContentSource::Database,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            source: ContentSource::Fallback,
        }
    }
}
