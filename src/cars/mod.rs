use axum::{routing::get, Router};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/car", get(handlers::list).post(handlers::store))
        .route(
            "/car/:id",
            get(handlers::show)
                .put(handlers::update)
                .delete(handlers::destroy),
        )
}
