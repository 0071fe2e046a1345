//! Session authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use atelier_core::types::DbId;
use atelier_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the HttpOnly cookie that carries the session token.
pub const SESSION_COOKIE: &str = "atelier_session";

/// Authenticated user extracted from a session token.
///
/// The token is read from `Authorization: Bearer <token>` or, failing that,
/// the [`SESSION_COOKIE`] cookie. The user row must still exist: any failure
/// along the way (missing token, bad signature, expiry, deleted user, database
/// error) rejects with `401`.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub email: String,
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let user = match UserRepo::find_by_id(&state.pool, claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::debug!(user_id = claims.sub, "Token for unknown user rejected");
                return Err(AppError::unauthorized("Invalid or expired token"));
            }
            Err(e) => {
                tracing::warn!(user_id = claims.sub, error = %e, "Session lookup failed");
                return Err(AppError::unauthorized("Authentication unavailable"));
            }
        };

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            role: user.role,
        })
    }
}

/// Bearer token first, then the session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}
