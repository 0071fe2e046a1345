use axum::routing::{get, post};
use axum::Router;

use crate::handlers::visits;
use crate::state::AppState;

/// Visit routes mounted at `/visits`. All public.
///
/// ```text
/// GET  /        -> visit_stats   (?period=7d|30d|1y|all)
/// POST /        -> record_visit
/// POST /track   -> track_visit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(visits::visit_stats).post(visits::record_visit))
        .route("/track", post(visits::track_visit))
}
