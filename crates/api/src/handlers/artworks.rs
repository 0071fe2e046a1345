//! Handlers for `/api/artworks`: gallery pieces, carousel slides, and scroll
//! sections, selected by `?type=gallery|carousel|scroll` (default gallery).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use atelier_core::content::{
    optional_text, optional_url, require_text, ArtworkKind, ReorderRequest, MAX_LONG_TEXT_LEN,
    MAX_SHORT_TEXT_LEN,
};
use atelier_core::error::CoreError;
use atelier_db::models::artwork::{
    CreateCarouselArtwork, CreateGalleryArtwork, CreateScrollContent, UpdateCarouselArtwork,
    UpdateGalleryArtwork, UpdateScrollContent,
};
use atelier_db::repositories::{
    CarouselArtworkRepo, GalleryArtworkRepo, ReorderOutcome, ScrollContentRepo,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::{from_value, AppJson, AppQuery};
use crate::fallback;
use crate::handlers::common::{
    item_or_fallback, list_or_fallback, not_found, optional_order, reorder_response,
    require_id, required_url, set_value, validate_reorder_request, UpdateRequest,
};
use crate::middleware::auth::AuthUser;
use crate::query::CollectionParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn entity(kind: ArtworkKind) -> &'static str {
    match kind {
        ArtworkKind::Gallery => "GalleryArtwork",
        ArtworkKind::Carousel => "CarouselArtwork",
        ArtworkKind::Scroll => "ScrollContent",
    }
}

fn created<T: Serialize>(row: T) -> Response {
    (StatusCode::CREATED, Json(DataResponse { data: row })).into_response()
}

fn ok<T: Serialize>(row: T) -> Response {
    Json(DataResponse { data: row }).into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/artworks?type=&id=
///
/// Public. Lists every item of the type in display order, or one item when
/// `id` is given. Database failures serve the built-in fallback.
pub async fn list_artworks(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CollectionParams>,
) -> AppResult<Response> {
    let kind = ArtworkKind::from_param(params.kind.as_deref())?;
    let pool = &state.pool;
    let name = entity(kind);
    let fallback = || fallback::artworks(kind);

    match (kind, params.id) {
        (ArtworkKind::Gallery, None) => Ok(list_or_fallback(
            name,
            GalleryArtworkRepo::list(pool).await,
            fallback,
        )),
        (ArtworkKind::Gallery, Some(id)) => item_or_fallback(
            name,
            id,
            GalleryArtworkRepo::find_by_id(pool, id).await,
            fallback,
        ),
        (ArtworkKind::Carousel, None) => Ok(list_or_fallback(
            name,
            CarouselArtworkRepo::list(pool).await,
            fallback,
        )),
        (ArtworkKind::Carousel, Some(id)) => item_or_fallback(
            name,
            id,
            CarouselArtworkRepo::find_by_id(pool, id).await,
            fallback,
        ),
        (ArtworkKind::Scroll, None) => Ok(list_or_fallback(
            name,
            ScrollContentRepo::list(pool).await,
            fallback,
        )),
        (ArtworkKind::Scroll, Some(id)) => item_or_fallback(
            name,
            id,
            ScrollContentRepo::find_by_id(pool, id).await,
            fallback,
        ),
    }
}

/// POST /api/artworks?type=
///
/// Create one item. A missing `order` appends to the end of the list.
pub async fn create_artwork(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<CollectionParams>,
    AppJson(body): AppJson<Value>,
) -> AppResult<Response> {
    let kind = ArtworkKind::from_param(params.kind.as_deref())?;
    let pool = &state.pool;

    let (id, response) = match kind {
        ArtworkKind::Gallery => {
            let input: CreateGalleryArtwork = from_value(body)?;
            validate_create_gallery(&input)?;
            let row = GalleryArtworkRepo::create(pool, &input).await?;
            (row.id, created(row))
        }
        ArtworkKind::Carousel => {
            let input: CreateCarouselArtwork = from_value(body)?;
            validate_create_carousel(&input)?;
            let row = CarouselArtworkRepo::create(pool, &input).await?;
            (row.id, created(row))
        }
        ArtworkKind::Scroll => {
            let input: CreateScrollContent = from_value(body)?;
            validate_create_scroll(&input)?;
            let row = ScrollContentRepo::create(pool, &input).await?;
            (row.id, created(row))
        }
    };

    tracing::info!(
        artwork_id = id,
        kind = kind.as_str(),
        user_id = user.user_id,
        "Artwork created",
    );

    Ok(response)
}

/// PUT /api/artworks?type=
///
/// Partially update the item named by the body's `id`.
pub async fn update_artwork(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<CollectionParams>,
    AppJson(body): AppJson<Value>,
) -> AppResult<Response> {
    let kind = ArtworkKind::from_param(params.kind.as_deref())?;
    let pool = &state.pool;
    let name = entity(kind);

    let (id, response) = match kind {
        ArtworkKind::Gallery => {
            let req: UpdateRequest<UpdateGalleryArtwork> = from_value(body)?;
            validate_update_gallery(&req.fields)?;
            let row = GalleryArtworkRepo::update(pool, req.id, &req.fields)
                .await?
                .ok_or_else(|| not_found(name, req.id))?;
            (req.id, ok(row))
        }
        ArtworkKind::Carousel => {
            let req: UpdateRequest<UpdateCarouselArtwork> = from_value(body)?;
            validate_update_carousel(&req.fields)?;
            let row = CarouselArtworkRepo::update(pool, req.id, &req.fields)
                .await?
                .ok_or_else(|| not_found(name, req.id))?;
            (req.id, ok(row))
        }
        ArtworkKind::Scroll => {
            let req: UpdateRequest<UpdateScrollContent> = from_value(body)?;
            validate_update_scroll(&req.fields)?;
            let row = ScrollContentRepo::update(pool, req.id, &req.fields)
                .await?
                .ok_or_else(|| not_found(name, req.id))?;
            (req.id, ok(row))
        }
    };

    tracing::info!(
        artwork_id = id,
        kind = kind.as_str(),
        user_id = user.user_id,
        "Artwork updated",
    );

    Ok(response)
}

/// DELETE /api/artworks?type=&id=
pub async fn delete_artwork(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<CollectionParams>,
) -> AppResult<StatusCode> {
    let kind = ArtworkKind::from_param(params.kind.as_deref())?;
    let id = require_id(params.id)?;

    let deleted = match kind {
        ArtworkKind::Gallery => GalleryArtworkRepo::delete(&state.pool, id).await?,
        ArtworkKind::Carousel => CarouselArtworkRepo::delete(&state.pool, id).await?,
        ArtworkKind::Scroll => ScrollContentRepo::delete(&state.pool, id).await?,
    };
    if !deleted {
        return Err(not_found(entity(kind), id));
    }

    tracing::info!(
        artwork_id = id,
        kind = kind.as_str(),
        user_id = user.user_id,
        "Artwork deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/artworks?type=
///
/// Apply `{items: [{id, order}]}` atomically. Any unknown id rolls the whole
/// batch back and answers 404.
pub async fn reorder_artworks(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<CollectionParams>,
    AppJson(input): AppJson<ReorderRequest>,
) -> AppResult<Json<DataResponse<Value>>> {
    let kind = ArtworkKind::from_param(params.kind.as_deref())?;
    validate_reorder_request(&input)?;

    let outcome: ReorderOutcome = match kind {
        ArtworkKind::Gallery => GalleryArtworkRepo::reorder(&state.pool, &input.items).await?,
        ArtworkKind::Carousel => CarouselArtworkRepo::reorder(&state.pool, &input.items).await?,
        ArtworkKind::Scroll => ScrollContentRepo::reorder(&state.pool, &input.items).await?,
    };

    if outcome == ReorderOutcome::Applied {
        tracing::info!(
            kind = kind.as_str(),
            count = input.items.len(),
            user_id = user.user_id,
            "Artworks reordered",
        );
    }

    reorder_response(entity(kind), outcome, input.items.len())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_create_gallery(input: &CreateGalleryArtwork) -> Result<(), CoreError> {
    require_text("title", &input.title, MAX_SHORT_TEXT_LEN)?;
    required_url("imageUrl", &input.image_url)?;
    require_text("category", &input.category, MAX_SHORT_TEXT_LEN)?;
    optional_text("description", input.description.as_deref(), MAX_LONG_TEXT_LEN)?;
    optional_text("medium", input.medium.as_deref(), MAX_SHORT_TEXT_LEN)?;
    optional_text("dimensions", input.dimensions.as_deref(), MAX_SHORT_TEXT_LEN)?;
    optional_order(input.sort_order)
}

fn validate_update_gallery(input: &UpdateGalleryArtwork) -> Result<(), CoreError> {
    if let Some(title) = &input.title {
        require_text("title", title, MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(url) = &input.image_url {
        required_url("imageUrl", url)?;
    }
    if let Some(category) = &input.category {
        require_text("category", category, MAX_SHORT_TEXT_LEN)?;
    }
    optional_text("description", set_value(&input.description), MAX_LONG_TEXT_LEN)?;
    optional_text("medium", set_value(&input.medium), MAX_SHORT_TEXT_LEN)?;
    optional_text("dimensions", set_value(&input.dimensions), MAX_SHORT_TEXT_LEN)?;
    optional_order(input.sort_order)
}

fn validate_create_carousel(input: &CreateCarouselArtwork) -> Result<(), CoreError> {
    require_text("title", &input.title, MAX_SHORT_TEXT_LEN)?;
    required_url("imageUrl", &input.image_url)?;
    optional_text("caption", input.caption.as_deref(), MAX_LONG_TEXT_LEN)?;
    optional_url("linkUrl", input.link_url.as_deref())?;
    optional_order(input.sort_order)
}

fn validate_update_carousel(input: &UpdateCarouselArtwork) -> Result<(), CoreError> {
    if let Some(title) = &input.title {
        require_text("title", title, MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(url) = &input.image_url {
        required_url("imageUrl", url)?;
    }
    optional_text("caption", set_value(&input.caption), MAX_LONG_TEXT_LEN)?;
    optional_url("linkUrl", set_value(&input.link_url))?;
    optional_order(input.sort_order)
}

fn validate_create_scroll(input: &CreateScrollContent) -> Result<(), CoreError> {
    require_text("title", &input.title, MAX_SHORT_TEXT_LEN)?;
    require_text("body", &input.body, MAX_LONG_TEXT_LEN)?;
    optional_text("subtitle", input.subtitle.as_deref(), MAX_SHORT_TEXT_LEN)?;
    optional_url("imageUrl", input.image_url.as_deref())?;
    optional_order(input.sort_order)
}

fn validate_update_scroll(input: &UpdateScrollContent) -> Result<(), CoreError> {
    if let Some(title) = &input.title {
        require_text("title", title, MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(body) = &input.body {
        require_text("body", body, MAX_LONG_TEXT_LEN)?;
    }
    optional_text("subtitle", set_value(&input.subtitle), MAX_SHORT_TEXT_LEN)?;
    optional_url("imageUrl", set_value(&input.image_url))?;
    optional_order(input.sort_order)
}
