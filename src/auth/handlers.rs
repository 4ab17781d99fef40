use axum::{
    extract::{FromRef, State},
    Json,
};
use tracing::{info, instrument, warn};

use crate::auth::dto::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};
use crate::auth::extractors::AuthUser;
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::state::AppState;
use crate::users::dto::{is_valid_email, PublicUser};
use crate::users::repo::User;

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let mut errors = FieldErrors::new();

    let name = payload.name.map(|n| n.trim().to_string()).unwrap_or_default();
    if name.is_empty() {
        errors.insert("name", "name is required".into());
    }

    let email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if email.is_empty() {
        errors.insert("email", "email is required".into());
    } else if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        errors.insert("email", "email must be a valid email address".into());
    } else if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        errors.insert("email", "email is already registered".into());
    }

    let password = payload.password.unwrap_or_default();
    if password.len() < 8 {
        errors.insert("password", "password must be at least 8 characters".into());
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let hash = hash_password(&password)?;
    let user = User::create(&state.db, &name, &email, &hash).await?;
    let role = user.account_role();

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_access(user.id, role)?;
    let refresh_token = keys.sign_refresh(user.id, role)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    payload.email = payload.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let role = user.account_role();
    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_access(user.id, role)?;
    let refresh_token = keys.sign_refresh(user.id, role)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    // Reload the user so a role change takes effect on the next pair.
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;

    let role = user.account_role();
    let access_token = keys.sign_access(user.id, role)?;
    let refresh_token = keys.sign_refresh(user.id, role)?;

    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, auth))]
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, auth.id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;
    Ok(Json(PublicUser::from(user)))
}
