//! Handlers for `/api/social-links`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use atelier_core::content::{optional_text, require_text, ReorderRequest, MAX_SHORT_TEXT_LEN};
use atelier_core::error::CoreError;
use atelier_db::models::social_link::{CreateSocialLink, SocialLink, UpdateSocialLink};
use atelier_db::repositories::{ReorderOutcome, SocialLinkRepo};
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::fallback;
use crate::handlers::common::{
    item_or_fallback, list_or_fallback, not_found, optional_order, reorder_response,
    require_id, required_url, set_value, validate_reorder_request, UpdateRequest,
};
use crate::middleware::auth::AuthUser;
use crate::query::IdParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "SocialLink";

/// GET /api/social-links?id=
pub async fn list_social_links(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParams>,
) -> AppResult<Response> {
    match params.id {
        None => Ok(list_or_fallback(
            ENTITY,
            SocialLinkRepo::list(&state.pool).await,
            fallback::social_links,
        )),
        Some(id) => item_or_fallback(
            ENTITY,
            id,
            SocialLinkRepo::find_by_id(&state.pool, id).await,
            fallback::social_links,
        ),
    }
}

/// POST /api/social-links
pub async fn create_social_link(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateSocialLink>,
) -> AppResult<Response> {
    validate_create(&input)?;
    let link = SocialLinkRepo::create(&state.pool, &input).await?;

    tracing::info!(
        social_link_id = link.id,
        platform = %link.platform,
        user_id = user.user_id,
        "Social link created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: link })).into_response())
}

/// PUT /api/social-links
pub async fn update_social_link(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<UpdateRequest<UpdateSocialLink>>,
) -> AppResult<Json<DataResponse<SocialLink>>> {
    validate_update(&req.fields)?;
    let link = SocialLinkRepo::update(&state.pool, req.id, &req.fields)
        .await?
        .ok_or_else(|| not_found(ENTITY, req.id))?;

    tracing::info!(social_link_id = req.id, user_id = user.user_id, "Social link updated");

    Ok(Json(DataResponse { data: link }))
}

/// DELETE /api/social-links?id=
pub async fn delete_social_link(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<IdParams>,
) -> AppResult<StatusCode> {
    let id = require_id(params.id)?;
    if !SocialLinkRepo::delete(&state.pool, id).await? {
        return Err(not_found(ENTITY, id));
    }

    tracing::info!(social_link_id = id, user_id = user.user_id, "Social link deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/social-links
pub async fn reorder_social_links(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<ReorderRequest>,
) -> AppResult<Json<DataResponse<Value>>> {
    validate_reorder_request(&input)?;
    let outcome = SocialLinkRepo::reorder(&state.pool, &input.items).await?;

    if outcome == ReorderOutcome::Applied {
        tracing::info!(count = input.items.len(), user_id = user.user_id, "Social links reordered");
    }

    reorder_response(ENTITY, outcome, input.items.len())
}

fn validate_create(input: &CreateSocialLink) -> Result<(), CoreError> {
    require_text("platform", &input.platform, MAX_SHORT_TEXT_LEN)?;
    required_url("url", &input.url)?;
    optional_text("icon", input.icon.as_deref(), MAX_SHORT_TEXT_LEN)?;
    optional_order(input.sort_order)
}

fn validate_update(input: &UpdateSocialLink) -> Result<(), CoreError> {
    if let Some(platform) = &input.platform {
        require_text("platform", platform, MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(url) = &input.url {
        required_url("url", url)?;
    }
    optional_text("icon", set_value(&input.icon), MAX_SHORT_TEXT_LEN)?;
    optional_order(input.sort_order)
}
