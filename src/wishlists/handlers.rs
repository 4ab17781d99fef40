use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::cars::repo::Car;
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::state::AppState;
use crate::users::repo::User;
use crate::wishlists::dto::{WishlistPair, WishlistRequest, WishlistResponse};
use crate::wishlists::repo::Wishlist;

async fn validate_pair(state: &AppState, payload: WishlistRequest) -> ApiResult<WishlistPair> {
    let pair = payload.validate().map_err(ApiError::Validation)?;

    let mut errors = FieldErrors::new();
    if !User::exists(&state.db, pair.user_id).await? {
        errors.insert("user_id", "user_id is not valid".into());
    }
    if !Car::exists(&state.db, pair.car_id).await? {
        errors.insert("car_id", "car_id is not valid".into());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok(pair)
}

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let rows = Wishlist::list(&state.db).await?;
    let data: Vec<WishlistResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(json!({ "wishlists": data })))
}

#[instrument(skip(state, _auth, payload))]
pub async fn store(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<WishlistRequest>,
) -> ApiResult<impl IntoResponse> {
    let pair = validate_pair(&state, payload).await?;
    let id = Wishlist::first_or_create(&state.db, &pair).await?;
    let detail = Wishlist::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Wishlist not found"))?;

    info!(wishlist_id = %id, "wishlist entry stored");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "wishlist": WishlistResponse::from(detail) })),
    ))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let detail = Wishlist::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Wishlist not found"))?;
    Ok(Json(json!({ "wishlist": WishlistResponse::from(detail) })))
}

#[instrument(skip(state, _auth, payload))]
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<WishlistRequest>,
) -> ApiResult<impl IntoResponse> {
    let pair = validate_pair(&state, payload).await?;
    if !Wishlist::update(&state.db, id, &pair).await? {
        return Err(ApiError::not_found("Wishlist not found"));
    }
    let detail = Wishlist::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Wishlist not found"))?;

    Ok(Json(json!({ "wishlist": WishlistResponse::from(detail) })))
}

#[instrument(skip(state, _auth))]
pub async fn destroy(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !Wishlist::delete(&state.db, id).await? {
        return Err(ApiError::not_found("Wishlist not found"));
    }

    info!(wishlist_id = %id, "wishlist entry deleted");
    Ok(Json(json!({ "message": "Deleted" })))
}
