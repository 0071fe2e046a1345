use axum::routing::get;
use axum::Router;

use crate::handlers::artworks;
use crate::state::AppState;

/// Artwork routes mounted at `/artworks`. `?type=` selects the table.
///
/// ```text
/// GET    /   -> list_artworks      (public; ?id= for one item)
/// POST   /   -> create_artwork
/// PUT    /   -> update_artwork     (id in body)
/// DELETE /   -> delete_artwork     (?id=)
/// PATCH  /   -> reorder_artworks
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(artworks::list_artworks)
            .post(artworks::create_artwork)
            .put(artworks::update_artwork)
            .delete(artworks::delete_artwork)
            .patch(artworks::reorder_artworks),
    )
}
