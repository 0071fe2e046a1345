//! Routes for the five singleton site documents.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use atelier_core::site_config::ConfigKind;
use serde_json::Value;

use crate::extract::AppJson;
use crate::handlers::site_config;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// One route per [`ConfigKind`], mounted at `/{key}`.
///
/// ```text
/// GET /hero        -> get_config(Hero)
/// PUT /hero        -> update_config(Hero)
/// ...              (about, art-process, contact, footer)
/// ```
pub fn router() -> Router<AppState> {
    ConfigKind::ALL
        .into_iter()
        .fold(Router::new(), |router, kind| {
            router.route(
                &format!("/{}", kind.key()),
                get(move |state: State<AppState>| site_config::get_config(state, kind)).put(
                    move |state: State<AppState>, user: AuthUser, body: AppJson<Value>| {
                        site_config::update_config(state, user, kind, body)
                    },
                ),
            )
        })
}
