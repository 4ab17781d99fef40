use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(handlers::store))
        .route("/reviews/all", get(handlers::list))
        .route("/reviews/:id", get(handlers::show))
        .route("/reviews/update/:id", put(handlers::update))
        .route("/reviews/delete/:id", delete(handlers::destroy))
}
