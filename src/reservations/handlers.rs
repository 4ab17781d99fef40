use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::claims::Role;
use crate::auth::extractors::AuthUser;
use crate::cars::repo::Car;
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::reservations::dto::{
    CreateReservationRequest, ListReservationsQuery, ReservationResponse,
    UpdateReservationStatusRequest,
};
use crate::reservations::repo::Reservation;
use crate::state::AppState;
use crate::users::repo::User;

#[instrument(skip(state, auth, payload))]
pub async fn store(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateReservationRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::User])?;

    let booking = payload.validate().map_err(ApiError::Validation)?;

    let mut errors = FieldErrors::new();
    if !User::exists(&state.db, booking.user_id).await? {
        errors.insert("user_id", "user_id is not valid".into());
    }
    if !Car::exists(&state.db, booking.car_id).await? {
        errors.insert("car_id", "car_id is not valid".into());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let reservation = Reservation::create(&state.db, &booking).await?;
    // Creation has no side effects beyond the row: stock is not decremented.
    let detail = Reservation::find_detail(&state.db, reservation.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reservation not found"))?;

    info!(reservation_id = %reservation.id, "reservation created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Reservation created",
            "reservation": ReservationResponse::from(detail),
        })),
    ))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let detail = Reservation::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reservation not found"))?;
    Ok(Json(json!({ "reservation": ReservationResponse::from(detail) })))
}

/// An empty result set (filtered or not) is reported as a no-data condition,
/// not an empty list.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListReservationsQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let filter = query.validate().map_err(ApiError::Validation)?;
    let rows = Reservation::list(&state.db, &filter).await?;
    if rows.is_empty() {
        return Err(ApiError::NoData("No reservation data found.".into()));
    }

    let data: Vec<ReservationResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(json!({
        "message": "Reservation data retrieved.",
        "data": data,
    })))
}

#[instrument(skip(state, auth, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReservationStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::User, Role::Admin])?;

    let patch = payload.validate().map_err(ApiError::Validation)?;
    if !Reservation::update_status(&state.db, id, &patch).await? {
        return Err(ApiError::not_found("Reservation not found"));
    }
    let detail = Reservation::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reservation not found"))?;

    info!(reservation_id = %id, "reservation status updated");
    Ok(Json(json!({
        "message": "Reservation status updated",
        "reservation": ReservationResponse::from(detail),
    })))
}

#[instrument(skip(state, auth))]
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;

    if !Reservation::delete(&state.db, id).await? {
        return Err(ApiError::not_found("Reservation not found"));
    }

    info!(reservation_id = %id, "reservation deleted");
    Ok(Json(json!({ "message": "Reservation deleted" })))
}
