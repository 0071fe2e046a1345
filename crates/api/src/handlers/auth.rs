//! Handlers for the `/auth` resource (login, logout, credentials, history).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use atelier_core::content::{require_text, validate_email, MAX_SHORT_TEXT_LEN};
use atelier_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use atelier_db::models::login_history::{CreateLoginAttempt, LoginHistoryPage};
use atelier_db::models::user::{UpdateCredentials, UserResponse};
use atelier_db::repositories::{LoginHistoryRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, verify_without_account,
    MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::{AuthUser, SESSION_COOKIE};
use crate::middleware::client::ClientInfo;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const INVALID_LOGIN: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Request body for `PUT /auth/credentials`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialsRequest {
    pub current_password: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub new_password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Verify email + password, record the attempt, and open a session. The
/// token is returned in the body and set as an HttpOnly cookie. Unknown
/// emails and wrong passwords fail identically.
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    jar: CookieJar,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<DataResponse<LoginResponse>>)> {
    let email = input.email.trim();
    let user = UserRepo::find_by_email(&state.pool, email).await?;

    let verified = match &user {
        Some(u) => verify_password(&input.password, &u.password_hash).unwrap_or_else(|e| {
            tracing::error!(user_id = u.id, error = %e, "Stored password hash is unreadable");
            false
        }),
        None => verify_without_account(&input.password),
    };

    LoginHistoryRepo::record(
        &state.pool,
        &CreateLoginAttempt {
            user_id: user.as_ref().map(|u| u.id),
            email: email.to_string(),
            ip_address: Some(client.ip.clone()),
            user_agent: client.user_agent.clone(),
            success: verified,
            created_at: None,
        },
    )
    .await?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::info!(email, ip = %client.ip, "Login failed");
            return Err(AppError::unauthorized(INVALID_LOGIN));
        }
    };

    let token = generate_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .path("/");

    tracing::info!(user_id = user.id, ip = %client.ip, "User logged in");

    Ok((
        jar.add(cookie),
        Json(DataResponse {
            data: LoginResponse {
                token,
                expires_in: state.config.jwt.expiry_secs(),
                user: UserResponse::from(&user),
            },
        }),
    ))
}

/// POST /api/auth/logout
///
/// Clear the session cookie. Tokens are stateless, so nothing is revoked
/// server-side.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}

/// GET /api/auth/credentials
pub async fn get_credentials(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/auth/credentials
///
/// Change email, display name, and/or password. The current password must
/// verify first; a taken email answers 409.
pub async fn update_credentials(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateCredentialsRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    let current_ok = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_ok {
        return Err(AppError::unauthorized("Current password is incorrect"));
    }

    let changes = validate_credentials(input)?;
    let updated = UserRepo::update_credentials(&state.pool, user.id, &changes)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    tracing::info!(
        user_id = updated.id,
        email_changed = changes.email.is_some(),
        password_changed = changes.password_hash.is_some(),
        "Credentials updated",
    );

    Ok(Json(DataResponse {
        data: UserResponse::from(&updated),
    }))
}

/// GET /api/auth/history?limit=&offset=
///
/// Login attempts for every account, newest first.
pub async fn login_history(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<DataResponse<LoginHistoryPage>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let items = LoginHistoryRepo::list(&state.pool, limit, offset).await?;
    let total = LoginHistoryRepo::count(&state.pool).await?;

    Ok(Json(DataResponse {
        data: LoginHistoryPage {
            items,
            total,
            limit,
            offset,
        },
    }))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check the requested changes and hash a new password.
fn validate_credentials(input: UpdateCredentialsRequest) -> AppResult<UpdateCredentials> {
    let email = input.email.map(|e| e.trim().to_string());
    if let Some(email) = &email {
        validate_email(email)?;
    }
    if let Some(name) = &input.name {
        require_text("name", name, MAX_SHORT_TEXT_LEN)?;
    }
    let password_hash = match &input.new_password {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(AppError::invalid)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    Ok(UpdateCredentials {
        email,
        name: input.name,
        password_hash,
    })
}
