//! Handlers for `/api/init`: first-run bootstrap and its status.
//!
//! Both routes require the `X-Init-Secret` header to match `INIT_SECRET`.
//! With no secret configured the endpoint always answers 401.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use atelier_core::content::{require_text, validate_email, MAX_SHORT_TEXT_LEN};
use atelier_core::error::CoreError;
use atelier_core::roles::ROLE_ADMIN;
use atelier_core::site_config::ConfigKind;
use atelier_db::models::user::{CreateUser, UserResponse};
use atelier_db::repositories::{SiteConfigRepo, UserRepo};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::{AdminCredentials, ServerConfig};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::router::INIT_SECRET_HEADER;
use crate::state::AppState;

/// Optional body of `POST /api/init`. Without one, the `ADMIN_*`
/// environment credentials are used.
#[derive(Debug, Deserialize)]
pub struct InitRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InitResponse {
    pub user: UserResponse,
    pub configs: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitStatus {
    pub initialized: bool,
    pub user_count: i64,
    pub configs: Vec<String>,
}

/// Compare the header against the configured secret through SHA-256 digests
/// so the comparison does not depend on where the strings first differ.
fn check_secret(headers: &HeaderMap, config: &ServerConfig) -> AppResult<()> {
    let expected = config
        .init_secret
        .as_deref()
        .ok_or_else(|| AppError::unauthorized("Initialization is disabled"))?;

    let provided = headers
        .get(INIT_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing X-Init-Secret header"))?;

    if Sha256::digest(provided.as_bytes()) != Sha256::digest(expected.as_bytes()) {
        return Err(AppError::unauthorized("Invalid init secret"));
    }
    Ok(())
}

fn admin_from_request(body: &[u8], config: &ServerConfig) -> AppResult<AdminCredentials> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return config.bootstrap_admin.clone().ok_or_else(|| {
            AppError::invalid("Request body or ADMIN_EMAIL/ADMIN_PASSWORD is required")
        });
    }
    let input: InitRequest =
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(AdminCredentials {
        email: input.email.trim().to_string(),
        password: input.password,
        name: input.name.unwrap_or_else(|| "Administrator".into()),
    })
}

fn already_initialized() -> AppError {
    AppError::Core(CoreError::Conflict("Site is already initialized".into()))
}

fn validate_admin(admin: &AdminCredentials) -> Result<(), CoreError> {
    validate_email(&admin.email)?;
    require_text("name", &admin.name, MAX_SHORT_TEXT_LEN)?;
    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH).map_err(CoreError::InvalidInput)
}

/// POST /api/init
///
/// Create the first administrator and every default site config. Answers
/// 409 once any user exists.
pub async fn initialize(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, Json<DataResponse<InitResponse>>)> {
    check_secret(&headers, &state.config)?;

    if UserRepo::count(&state.pool).await? > 0 {
        return Err(already_initialized());
    }

    let admin = admin_from_request(&body, &state.config)?;
    validate_admin(&admin)?;

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create_first(
        &state.pool,
        &CreateUser {
            email: admin.email,
            password_hash,
            name: admin.name,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?
    .ok_or_else(already_initialized)?;

    let mut configs = Vec::with_capacity(ConfigKind::ALL.len());
    for kind in ConfigKind::ALL {
        SiteConfigRepo::get_or_create(&state.pool, kind.key(), &kind.default_document()).await?;
        configs.push(kind.key().to_string());
    }

    tracing::info!(user_id = user.id, email = %user.email, "Site initialized");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: InitResponse {
                user: UserResponse::from(&user),
                configs,
            },
        }),
    ))
}

/// GET /api/init
pub async fn init_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<DataResponse<InitStatus>>> {
    check_secret(&headers, &state.config)?;

    let user_count = UserRepo::count(&state.pool).await?;
    let configs = SiteConfigRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|c| c.key)
        .collect();

    Ok(Json(DataResponse {
        data: InitStatus {
            initialized: user_count > 0,
            user_count,
            configs,
        },
    }))
}
