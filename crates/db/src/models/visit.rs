//! Visit log rows.

use atelier_core::analytics::VisitSample;
use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `visits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: DbId,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub path: String,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub created_at: Timestamp,
}

impl VisitSample for Visit {
    fn ip(&self) -> &str {
        &self.ip_address
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    fn visited_at(&self) -> Timestamp {
        self.created_at
    }
}

/// DTO for appending a visit. Geo fields are filled by the track endpoint.
#[derive(Debug, Clone, Default)]
pub struct CreateVisit {
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub path: String,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    /// Explicit timestamp, used when copying history between databases.
    pub created_at: Option<Timestamp>,
}
