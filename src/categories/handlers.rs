use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::claims::Role;
use crate::auth::extractors::AuthUser;
use crate::categories::repo::Category;
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(serialize_with = "crate::datetime::timestamp::serialize")]
    pub created_at: OffsetDateTime,
    #[serde(serialize_with = "crate::datetime::timestamp::serialize")]
    pub updated_at: OffsetDateTime,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

async fn validate_name(
    state: &AppState,
    payload: CategoryRequest,
    exclude: Option<Uuid>,
) -> ApiResult<String> {
    let mut errors = FieldErrors::new();
    let name = payload.name.map(|n| n.trim().to_string()).unwrap_or_default();
    if name.is_empty() {
        errors.insert("name", "name is required".into());
    } else if name.len() > 255 {
        errors.insert("name", "name must not exceed 255 characters".into());
    } else if Category::name_taken(&state.db, &name, exclude).await? {
        errors.insert("name", "name is already taken".into());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok(name)
}

#[instrument(skip(state, auth, payload))]
pub async fn store(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;

    let name = validate_name(&state, payload, None).await?;
    let category = Category::create(&state.db, &name).await?;

    info!(category_id = %category.id, "category created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Category created",
            "data": CategoryResponse::from(category),
        })),
    ))
}

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let categories = Category::list(&state.db).await?;
    let data: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(Json(json!({ "categories": data })))
}

#[instrument(skip(state, auth, payload))]
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;

    let name = validate_name(&state, payload, Some(id)).await?;
    let category = Category::update(&state.db, id, &name)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(Json(json!({
        "message": "Category updated",
        "data": CategoryResponse::from(category),
    })))
}

#[instrument(skip(state, auth))]
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;

    if !Category::delete(&state.db, id).await? {
        return Err(ApiError::not_found("Category not found"));
    }

    info!(category_id = %id, "category deleted");
    Ok(Json(json!({ "message": "Category deleted" })))
}
