use axum::{routing::get, Router};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/user/:id",
        get(handlers::get_user)
            .put(handlers::update_user)
            .delete(handlers::delete_user),
    )
}
