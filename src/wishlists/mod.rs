use axum::{routing::get, Router};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishlists", get(handlers::list).post(handlers::store))
        .route(
            "/wishlists/:id",
            get(handlers::show)
                .put(handlers::update)
                .delete(handlers::destroy),
        )
}
