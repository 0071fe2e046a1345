use axum::routing::get;
use axum::Router;

use crate::handlers::testimonials;
use crate::state::AppState;

/// Testimonial and skill routes mounted at `/testimonials`.
///
/// ```text
/// GET    /   -> list_testimonials   (public; ?type=testimonials|skills, ?id=)
/// POST   /   -> create_testimonial
/// PUT    /   -> update_testimonial
/// DELETE /   -> delete_testimonial  (?id=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(testimonials::list_testimonials)
            .post(testimonials::create_testimonial)
            .put(testimonials::update_testimonial)
            .delete(testimonials::delete_testimonial),
    )
}
