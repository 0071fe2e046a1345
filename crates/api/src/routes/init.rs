use axum::routing::get;
use axum::Router;

use crate::handlers::init;
use crate::state::AppState;

/// Bootstrap routes mounted at `/init`.
///
/// ```text
/// GET  /   -> init_status
/// POST /   -> initialize
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(init::init_status).post(init::initialize))
}
