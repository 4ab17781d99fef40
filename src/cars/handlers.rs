use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::claims::Role;
use crate::auth::extractors::AuthUser;
use crate::cars::dto::{CarRequest, CarResponse, NewCar};
use crate::cars::repo::Car;
use crate::categories::repo::Category;
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::state::AppState;
use crate::users::repo::User;

/// Shared by store and update: field checks first, then reference existence.
async fn validate_car(state: &AppState, payload: CarRequest) -> ApiResult<NewCar> {
    let car = payload.validate().map_err(ApiError::Validation)?;

    let mut errors = FieldErrors::new();
    if !User::exists(&state.db, car.user_id).await? {
        errors.insert("user_id", "user_id is not valid".into());
    }
    if !Category::exists(&state.db, car.category_id).await? {
        errors.insert("category_id", "category_id is not valid".into());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok(car)
}

#[instrument(skip(state, auth, payload))]
pub async fn store(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CarRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;

    let new_car = validate_car(&state, payload).await?;
    let car = Car::create(&state.db, &new_car).await?;

    info!(car_id = %car.id, "car created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Car created",
            "data": CarResponse::from(car),
        })),
    ))
}

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let cars = Car::list(&state.db).await?;
    let data: Vec<CarResponse> = cars.into_iter().map(Into::into).collect();
    Ok(Json(json!({ "cars": data })))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let car = Car::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Car not found"))?;
    Ok(Json(json!({ "car": CarResponse::from(car) })))
}

#[instrument(skip(state, auth, payload))]
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CarRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;

    let new_car = validate_car(&state, payload).await?;
    let car = Car::update(&state.db, id, &new_car)
        .await?
        .ok_or_else(|| ApiError::not_found("Car not found"))?;

    Ok(Json(json!({
        "message": "Car updated",
        "data": CarResponse::from(car),
    })))
}

#[instrument(skip(state, auth))]
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;

    if !Car::delete(&state.db, id).await? {
        return Err(ApiError::not_found("Car not found"));
    }

    info!(car_id = %id, "car deleted");
    Ok(Json(json!({ "message": "Car deleted" })))
}
