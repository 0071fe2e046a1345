//! Handlers for `/api/ad-banners`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use atelier_core::content::{
    optional_text, optional_url, require_text, MAX_LONG_TEXT_LEN, MAX_SHORT_TEXT_LEN,
};
use atelier_core::error::CoreError;
use atelier_db::models::ad_banner::{AdBanner, CreateAdBanner, UpdateAdBanner};
use atelier_db::repositories::AdBannerRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::fallback;
use crate::handlers::common::{
    item_or_fallback, list_or_fallback, not_found, optional_order, require_id, set_value,
    UpdateRequest,
};
use crate::middleware::auth::AuthUser;
use crate::query::{BannerParams, IdParams};
use crate::response::{ContentResponse, DataResponse};
use crate::state::AppState;

const ENTITY: &str = "AdBanner";

/// GET /api/ad-banners?id=&active=
///
/// `active=true` narrows the list to banners the site should display.
pub async fn list_ad_banners(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<BannerParams>,
) -> AppResult<Response> {
    if let Some(id) = params.id {
        return item_or_fallback(
            ENTITY,
            id,
            AdBannerRepo::find_by_id(&state.pool, id).await,
            fallback::ad_banners,
        );
    }

    // The filter applies to a populated table only, so an empty match is
    // still a database answer.
    match AdBannerRepo::list(&state.pool).await {
        Ok(rows) if !rows.is_empty() => {
            let banners: Vec<_> = match params.active {
                Some(active) => rows.into_iter().filter(|b| b.is_active == active).collect(),
                None => rows,
            };
            Ok(Json(ContentResponse::database(banners)).into_response())
        }
        result => Ok(list_or_fallback(ENTITY, result, fallback::ad_banners)),
    }
}

/// POST /api/ad-banners
///
/// New banners are active unless `isActive: false` is sent.
pub async fn create_ad_banner(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateAdBanner>,
) -> AppResult<Response> {
    validate_create(&input)?;
    let banner = AdBannerRepo::create(&state.pool, &input).await?;

    tracing::info!(
        ad_banner_id = banner.id,
        is_active = banner.is_active,
        user_id = user.user_id,
        "Ad banner created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: banner })).into_response())
}

/// PUT /api/ad-banners
pub async fn update_ad_banner(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<UpdateRequest<UpdateAdBanner>>,
) -> AppResult<Json<DataResponse<AdBanner>>> {
    validate_update(&req.fields)?;
    let banner = AdBannerRepo::update(&state.pool, req.id, &req.fields)
        .await?
        .ok_or_else(|| not_found(ENTITY, req.id))?;

    tracing::info!(ad_banner_id = req.id, user_id = user.user_id, "Ad banner updated");

    Ok(Json(DataResponse { data: banner }))
}

/// DELETE /api/ad-banners?id=
pub async fn delete_ad_banner(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<IdParams>,
) -> AppResult<StatusCode> {
    let id = require_id(params.id)?;
    if !AdBannerRepo::delete(&state.pool, id).await? {
        return Err(not_found(ENTITY, id));
    }

    tracing::info!(ad_banner_id = id, user_id = user.user_id, "Ad banner deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn validate_create(input: &CreateAdBanner) -> Result<(), CoreError> {
    require_text("title", &input.title, MAX_SHORT_TEXT_LEN)?;
    optional_text("description", input.description.as_deref(), MAX_LONG_TEXT_LEN)?;
    optional_url("imageUrl", input.image_url.as_deref())?;
    optional_url("linkUrl", input.link_url.as_deref())?;
    optional_text("buttonText", input.button_text.as_deref(), MAX_SHORT_TEXT_LEN)?;
    optional_order(input.sort_order)
}

fn validate_update(input: &UpdateAdBanner) -> Result<(), CoreError> {
    if let Some(title) = &input.title {
        require_text("title", title, MAX_SHORT_TEXT_LEN)?;
    }
    optional_text("description", set_value(&input.description), MAX_LONG_TEXT_LEN)?;
    optional_url("imageUrl", set_value(&input.image_url))?;
    optional_url("linkUrl", set_value(&input.link_url))?;
    optional_text("buttonText", set_value(&input.button_text), MAX_SHORT_TEXT_LEN)?;
    optional_order(input.sort_order)
}
