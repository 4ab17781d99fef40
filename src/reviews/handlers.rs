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
use crate::reviews::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use crate::reviews::repo::Review;
use crate::state::AppState;
use crate::users::repo::User;

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let reviews = Review::list(&state.db).await?;
    let data: Vec<ReviewResponse> = reviews.into_iter().map(Into::into).collect();
    Ok(Json(json!({ "reviews": data })))
}

#[instrument(skip(state, _auth, payload))]
pub async fn store(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_review = payload.validate().map_err(ApiError::Validation)?;

    let mut errors = FieldErrors::new();
    if !User::exists(&state.db, new_review.user_id).await? {
        errors.insert("user_id", "user_id is not valid".into());
    }
    if !Car::exists(&state.db, new_review.car_id).await? {
        errors.insert("car_id", "car_id is not valid".into());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let review = Review::create(&state.db, &new_review).await?;

    info!(review_id = %review.id, "review created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "review": ReviewResponse::from(review) })),
    ))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let review = Review::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;
    Ok(Json(json!({ "review": ReviewResponse::from(review) })))
}

#[instrument(skip(state, _auth, payload))]
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let patch = payload.validate().map_err(ApiError::Validation)?;
    let review = Review::update(&state.db, id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    Ok(Json(json!({ "review": ReviewResponse::from(review) })))
}

#[instrument(skip(state, _auth))]
pub async fn destroy(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !Review::delete(&state.db, id).await? {
        return Err(ApiError::not_found("Review not found"));
    }

    info!(review_id = %id, "review deleted");
    Ok(Json(json!({ "message": "Review deleted" })))
}
