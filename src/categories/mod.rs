use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/category", get(handlers::list).post(handlers::store))
        .route(
            "/category/:id",
            put(handlers::update).delete(handlers::destroy),
        )
}
