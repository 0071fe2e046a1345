use axum::routing::get;
use axum::Router;

use crate::handlers::ad_banners;
use crate::state::AppState;

/// Ad banner routes mounted at `/ad-banners`.
///
/// ```text
/// GET    /   -> list_ad_banners   (public; ?active=true for live banners)
/// POST   /   -> create_ad_banner
/// PUT    /   -> update_ad_banner
/// DELETE /   -> delete_ad_banner  (?id=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(ad_banners::list_ad_banners)
            .post(ad_banners::create_ad_banner)
            .put(ad_banners::update_ad_banner)
            .delete(ad_banners::delete_ad_banner),
    )
}
