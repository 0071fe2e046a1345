pub mod ad_banners;
pub mod artworks;
pub mod auth;
pub mod health;
pub mod init;
pub mod site_config;
pub mod social_links;
pub mod testimonials;
pub mod visits;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /hero, /about, /art-process, /contact, /footer   get (public), put (auth)
///
/// /artworks?type=gallery|carousel|scroll           list (public), create, update, delete, reorder
/// /testimonials?type=testimonials|skills           list (public), create, update, delete
/// /social-links                                    list (public), create, update, delete, reorder
/// /ad-banners                                      list (public), create, update, delete
///
/// /visits                                          stats (GET), record (POST)
/// /visits/track                                    record with geolocation (POST)
///
/// /auth/login                                      login (public)
/// /auth/logout                                     logout (public)
/// /auth/credentials                                get, update (auth)
/// /auth/history                                    login audit log (auth)
///
/// /init                                            status (GET), bootstrap (POST); shared secret
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(site_config::router())
        .nest("/artworks", artworks::router())
        .nest("/testimonials", testimonials::router())
        .nest("/social-links", social_links::router())
        .nest("/ad-banners", ad_banners::router())
        .nest("/visits", visits::router())
        .nest("/auth", auth::router())
        .nest("/init", init::router())
}
