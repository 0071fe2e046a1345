//! Handlers for the singleton site documents (`/hero`, `/about`,
//! `/art-process`, `/contact`, `/footer`).
//!
//! The routes bind a [`ConfigKind`] per path, so the same two handlers serve
//! all five documents.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use atelier_core::site_config::{merge_document, ConfigKind};
use atelier_db::repositories::SiteConfigRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::fallback;
use crate::middleware::auth::AuthUser;
use crate::response::{ContentResponse, DataResponse};
use crate::state::AppState;

/// GET /api/{kind}
///
/// Return the stored document, creating it from the defaults on first read.
/// Falls back to the defaults (without storing them) if the database fails.
pub async fn get_config(State(state): State<AppState>, kind: ConfigKind) -> Response {
    match SiteConfigRepo::get_or_create(&state.pool, kind.key(), &kind.default_document()).await {
        Ok(row) => Json(ContentResponse::database(row.content)).into_response(),
        Err(e) => {
            tracing::warn!(kind = %kind, error = %e, "Database read failed, serving fallback config");
            Json(ContentResponse::fallback(fallback::config(kind))).into_response()
        }
    }
}

/// PUT /api/{kind}
///
/// Merge the body's top-level fields over the stored document, validate the
/// result, and store it. Concurrent writers are last-write-wins.
pub async fn update_config(
    State(state): State<AppState>,
    user: AuthUser,
    kind: ConfigKind,
    AppJson(patch): AppJson<Value>,
) -> AppResult<Json<DataResponse<Value>>> {
    let saved = SiteConfigRepo::merge(&state.pool, kind.key(), kind.default_document(), |current| {
        let merged = merge_document(current, &patch)?;
        Ok::<_, AppError>(kind.normalize(merged)?)
    })
    .await?;

    tracing::info!(kind = %kind, user_id = user.user_id, "Site config updated");

    Ok(Json(DataResponse { data: saved.content }))
}
