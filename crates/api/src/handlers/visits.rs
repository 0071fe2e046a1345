//! Handlers for `/api/visits`: the public visit log and its analytics.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use atelier_core::analytics::{aggregate, Period, VisitStats};
use atelier_core::content::{optional_text, validate_visit_path, MAX_SHORT_TEXT_LEN, MAX_URL_LEN};
use atelier_core::error::CoreError;
use atelier_db::models::visit::{CreateVisit, Visit};
use atelier_db::repositories::VisitRepo;
use chrono::Utc;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::geo;
use crate::middleware::client::ClientInfo;
use crate::query::PeriodParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/visits` and `POST /api/visits/track`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVisitRequest {
    pub path: String,
    pub referrer: Option<String>,
    /// Overrides the request `User-Agent` header.
    pub user_agent: Option<String>,
}

fn validate_visit(input: &RecordVisitRequest) -> Result<(), CoreError> {
    validate_visit_path(&input.path)?;
    optional_text("referrer", input.referrer.as_deref(), MAX_URL_LEN)?;
    optional_text("userAgent", input.user_agent.as_deref(), MAX_SHORT_TEXT_LEN * 2)
}

fn new_visit(client: ClientInfo, input: RecordVisitRequest) -> CreateVisit {
    CreateVisit {
        ip_address: client.ip,
        user_agent: input.user_agent.or(client.user_agent),
        path: input.path,
        referrer: input.referrer.filter(|r| !r.is_empty()),
        ..CreateVisit::default()
    }
}

/// POST /api/visits
///
/// Append one visit for the calling client.
pub async fn record_visit(
    State(state): State<AppState>,
    client: ClientInfo,
    AppJson(input): AppJson<RecordVisitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Visit>>)> {
    validate_visit(&input)?;
    let visit = VisitRepo::create(&state.pool, &new_visit(client, input)).await?;

    tracing::debug!(visit_id = visit.id, path = %visit.path, "Visit recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: visit })))
}

/// POST /api/visits/track
///
/// Like [`record_visit`], enriched with country, region and city when the
/// client address is public and the lookup answers in time.
pub async fn track_visit(
    State(state): State<AppState>,
    client: ClientInfo,
    AppJson(input): AppJson<RecordVisitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Visit>>)> {
    validate_visit(&input)?;

    let location = geo::locate(state.geo.as_ref(), &client.ip).await;
    let mut visit = new_visit(client, input);
    if let Some(location) = location {
        visit.country = location.country;
        visit.region = location.region;
        visit.city = location.city;
    }

    let visit = VisitRepo::create(&state.pool, &visit).await?;

    tracing::debug!(
        visit_id = visit.id,
        path = %visit.path,
        country = visit.country.as_deref().unwrap_or("-"),
        "Visit tracked",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: visit })))
}

/// GET /api/visits?period=7d|30d|1y|all
///
/// Aggregate every visit in the window. Database errors propagate; there is
/// no fallback for analytics.
pub async fn visit_stats(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PeriodParams>,
) -> AppResult<Json<DataResponse<VisitStats>>> {
    let period = Period::from_param(params.period.as_deref())?;
    let now = Utc::now();

    let visits = VisitRepo::list_since(&state.pool, period.window_start(now)).await?;
    let stats = aggregate(period, now, &visits);

    Ok(Json(DataResponse { data: stats }))
}
