//! Login attempt audit rows.

use serde::Serialize;
use sqlx::FromRow;
use atelier_core::types::{DbId, Timestamp};

/// A row from the `login_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginHistory {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub email: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub success: bool,
    pub created_at: Timestamp,
}

/// One recorded login attempt. `user_id` is `None` for unknown emails.
#[derive(Debug, Clone)]
pub struct CreateLoginAttempt {
    pub user_id: Option<DbId>,
    pub email: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub success: bool,
    /// Explicit timestamp, used when copying history between databases.
    pub created_at: Option<Timestamp>,
}

/// A page of login history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct LoginHistoryPage {
    pub items: Vec<LoginHistory>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
