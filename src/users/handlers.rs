use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::claims::Role;
use crate::auth::extractors::AuthUser;
use crate::auth::password::hash_password;
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::state::AppState;
use crate::users::dto::{is_valid_email, PublicUser, UpdateUserRequest};
use crate::users::repo::User;

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(json!({ "user": PublicUser::from(user) })))
}

#[instrument(skip(state, auth, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    // Users may edit themselves; anyone else needs the admin role.
    if auth.id != id {
        auth.require_role(&[Role::Admin])?;
    }

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
        errors.insert("email", "email must be a valid email address".into());
    }
    if let Some(password) = payload.password.as_deref() {
        if password.len() < 8 {
            errors.insert("password", "password must be at least 8 characters".into());
        }
    }
    if let Some(existing) = User::find_by_email(&state.db, &email).await? {
        if existing.id != id {
            errors.insert("email", "email is already taken".into());
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let password_hash = match payload.password.as_deref() {
        Some(plain) => Some(hash_password(plain)?),
        None => None,
    };

    let user = User::update(&state.db, id, &name, &email, password_hash.as_deref())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(json!({
        "message": "User updated",
        "user": PublicUser::from(user),
    })))
}

#[instrument(skip(state, auth))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;

    if !User::delete(&state.db, id).await? {
        return Err(ApiError::not_found("User not found"));
    }

    info!(user_id = %id, "user deleted");
    Ok(Json(json!({ "message": "User deleted" })))
}
