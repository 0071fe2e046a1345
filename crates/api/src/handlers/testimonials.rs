//! Handlers for `/api/testimonials`: client testimonials and the skills they
//! can highlight, selected by `?type=testimonials|skills`.
//!
//! Testimonials take `skillIds` on input and answer with
//! `skillsHighlighted: [{id, name}]`. An unknown skill id is rejected by the
//! foreign key and surfaces as `400`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use atelier_core::content::{
    optional_text, optional_url, require_text, validate_rating, validate_skill_level,
    TestimonialKind, MAX_LONG_TEXT_LEN, MAX_SHORT_TEXT_LEN,
};
use atelier_core::error::CoreError;
use atelier_db::models::testimonial::{
    CreateSkill, CreateTestimonial, UpdateSkill, UpdateTestimonial,
};
use atelier_db::repositories::{SkillRepo, TestimonialRepo};
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::{from_value, AppJson, AppQuery};
use crate::fallback;
use crate::handlers::common::{
    item_or_fallback, list_or_fallback, not_found, optional_order, require_id, set_value,
    UpdateRequest,
};
use crate::middleware::auth::AuthUser;
use crate::query::CollectionParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn entity(kind: TestimonialKind) -> &'static str {
    match kind {
        TestimonialKind::Testimonials => "Testimonial",
        TestimonialKind::Skills => "Skill",
    }
}

/// GET /api/testimonials?type=&id=
pub async fn list_testimonials(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CollectionParams>,
) -> AppResult<Response> {
    let kind = TestimonialKind::from_param(params.kind.as_deref())?;
    let pool = &state.pool;
    let name = entity(kind);
    let fallback = || fallback::testimonials(kind);

    match (kind, params.id) {
        (TestimonialKind::Testimonials, None) => Ok(list_or_fallback(
            name,
            TestimonialRepo::list(pool).await,
            fallback,
        )),
        (TestimonialKind::Testimonials, Some(id)) => item_or_fallback(
            name,
            id,
            TestimonialRepo::find_by_id(pool, id).await,
            fallback,
        ),
        (TestimonialKind::Skills, None) => {
            Ok(list_or_fallback(name, SkillRepo::list(pool).await, fallback))
        }
        (TestimonialKind::Skills, Some(id)) => item_or_fallback(
            name,
            id,
            SkillRepo::find_by_id(pool, id).await,
            fallback,
        ),
    }
}

/// POST /api/testimonials?type=
pub async fn create_testimonial(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<CollectionParams>,
    AppJson(body): AppJson<Value>,
) -> AppResult<Response> {
    let kind = TestimonialKind::from_param(params.kind.as_deref())?;

    match kind {
        TestimonialKind::Testimonials => {
            let input: CreateTestimonial = from_value(body)?;
            validate_create_testimonial(&input)?;
            let row = TestimonialRepo::create(&state.pool, &input).await?;
            tracing::info!(
                testimonial_id = row.testimonial.id,
                skills = row.skills_highlighted.len(),
                user_id = user.user_id,
                "Testimonial created",
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: row })).into_response())
        }
        TestimonialKind::Skills => {
            let input: CreateSkill = from_value(body)?;
            validate_create_skill(&input)?;
            let row = SkillRepo::create(&state.pool, &input).await?;
            tracing::info!(skill_id = row.id, name = %row.name, user_id = user.user_id, "Skill created");
            Ok((StatusCode::CREATED, Json(DataResponse { data: row })).into_response())
        }
    }
}

/// PUT /api/testimonials?type=
///
/// A present `skillIds` replaces the testimonial's highlighted skills.
pub async fn update_testimonial(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<CollectionParams>,
    AppJson(body): AppJson<Value>,
) -> AppResult<Response> {
    let kind = TestimonialKind::from_param(params.kind.as_deref())?;
    let name = entity(kind);

    match kind {
        TestimonialKind::Testimonials => {
            let req: UpdateRequest<UpdateTestimonial> = from_value(body)?;
            validate_update_testimonial(&req.fields)?;
            let row = TestimonialRepo::update(&state.pool, req.id, &req.fields)
                .await?
                .ok_or_else(|| not_found(name, req.id))?;
            tracing::info!(testimonial_id = req.id, user_id = user.user_id, "Testimonial updated");
            Ok(Json(DataResponse { data: row }).into_response())
        }
        TestimonialKind::Skills => {
            let req: UpdateRequest<UpdateSkill> = from_value(body)?;
            validate_update_skill(&req.fields)?;
            let row = SkillRepo::update(&state.pool, req.id, &req.fields)
                .await?
                .ok_or_else(|| not_found(name, req.id))?;
            tracing::info!(skill_id = req.id, user_id = user.user_id, "Skill updated");
            Ok(Json(DataResponse { data: row }).into_response())
        }
    }
}

/// DELETE /api/testimonials?type=&id=
///
/// Removes the row and, through the cascade, only its skill links.
pub async fn delete_testimonial(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<CollectionParams>,
) -> AppResult<StatusCode> {
    let kind = TestimonialKind::from_param(params.kind.as_deref())?;
    let id = require_id(params.id)?;

    let deleted = match kind {
        TestimonialKind::Testimonials => TestimonialRepo::delete(&state.pool, id).await?,
        TestimonialKind::Skills => SkillRepo::delete(&state.pool, id).await?,
    };
    if !deleted {
        return Err(not_found(entity(kind), id));
    }

    tracing::info!(id, entity = entity(kind), user_id = user.user_id, "Deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_skill_ids(ids: &[i64]) -> Result<(), CoreError> {
    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
        return Err(CoreError::InvalidInput(format!("invalid skill id {bad}")));
    }
    Ok(())
}

fn validate_create_testimonial(input: &CreateTestimonial) -> Result<(), CoreError> {
    require_text("name", &input.name, MAX_SHORT_TEXT_LEN)?;
    require_text("content", &input.content, MAX_LONG_TEXT_LEN)?;
    validate_rating(input.rating)?;
    optional_text("role", input.role.as_deref(), MAX_SHORT_TEXT_LEN)?;
    optional_text("company", input.company.as_deref(), MAX_SHORT_TEXT_LEN)?;
    optional_url("avatarUrl", input.avatar_url.as_deref())?;
    validate_skill_ids(&input.skill_ids)?;
    optional_order(input.sort_order)
}

fn validate_update_testimonial(input: &UpdateTestimonial) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        require_text("name", name, MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(content) = &input.content {
        require_text("content", content, MAX_LONG_TEXT_LEN)?;
    }
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }
    optional_text("role", set_value(&input.role), MAX_SHORT_TEXT_LEN)?;
    optional_text("company", set_value(&input.company), MAX_SHORT_TEXT_LEN)?;
    optional_url("avatarUrl", set_value(&input.avatar_url))?;
    if let Some(ids) = &input.skill_ids {
        validate_skill_ids(ids)?;
    }
    optional_order(input.sort_order)
}

fn validate_create_skill(input: &CreateSkill) -> Result<(), CoreError> {
    require_text("name", &input.name, MAX_SHORT_TEXT_LEN)?;
    validate_skill_level(input.level)?;
    optional_text("category", input.category.as_deref(), MAX_SHORT_TEXT_LEN)?;
    optional_order(input.sort_order)
}

fn validate_update_skill(input: &UpdateSkill) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        require_text("name", name, MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(level) = input.level {
        validate_skill_level(level)?;
    }
    optional_text("category", set_value(&input.category), MAX_SHORT_TEXT_LEN)?;
    optional_order(input.sort_order)
}
