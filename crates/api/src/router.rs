//! Router assembly.
//!
//! [`build_app_router`] is shared by `main.rs` and the integration tests so
//! both exercise the same routes and middleware.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Maximum accepted request body size.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Header carrying the bootstrap secret for `/api/init`.
pub const INIT_SECRET_HEADER: &str = "x-init-secret";

const REQUEST_ID_HEADER: &str = "x-request-id";

const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

/// `/health` at the root, everything else under `/api`, wrapped in the
/// middleware stack.
///
/// Layers run outermost first on the way in:
///
/// ```text
/// CORS -> set x-request-id -> trace -> propagate x-request-id
///      -> gzip -> 2 MB body limit -> timeout (408) -> catch panic (500)
///      -> handler
/// ```
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let routes = Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes());

    with_middleware(routes, config).with_state(state)
}

fn with_middleware(router: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout = Duration::from_secs(config.request_timeout_secs);

    router
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
}

/// CORS for the configured admin/front-end origins. Credentials are allowed
/// so the session cookie travels with cross-origin requests.
///
/// # Panics
///
/// Panics on an origin that is not a valid header value, so a bad
/// `CORS_ORIGINS` stops the server at startup.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static(INIT_SECRET_HEADER),
        ])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}
