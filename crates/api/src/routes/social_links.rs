use axum::routing::get;
use axum::Router;

use crate::handlers::social_links;
use crate::state::AppState;

/// Social link routes mounted at `/social-links`.
///
/// ```text
/// GET    /   -> list_social_links    (public)
/// POST   /   -> create_social_link
/// PUT    /   -> update_social_link
/// DELETE /   -> delete_social_link   (?id=)
/// PATCH  /   -> reorder_social_links
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(social_links::list_social_links)
            .post(social_links::create_social_link)
            .put(social_links::update_social_link)
            .delete(social_links::delete_social_link)
            .patch(social_links::reorder_social_links),
    )
}
