use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes mounted at `/auth`.
///
/// ```text
/// POST /login         -> login               (public)
/// POST /logout        -> logout              (public)
/// GET  /credentials   -> get_credentials
/// PUT  /credentials   -> update_credentials
/// GET  /history       -> login_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route(
            "/credentials",
            get(auth::get_credentials).put(auth::update_credentials),
        )
        .route("/history", get(auth::login_history))
}
