use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod status;

/// The older route-table revision used `/all`, `/update/{id}` and
/// `/delete/{id}`; both spellings are kept routable.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/reservation",
            get(handlers::list).post(handlers::store),
        )
        .route("/reservation/all", get(handlers::list))
        .route(
            "/reservation/:id",
            get(handlers::show)
                .put(handlers::update_status)
                .delete(handlers::destroy),
        )
        .route("/reservation/update/:id", put(handlers::update_status))
        .route("/reservation/delete/:id", delete(handlers::destroy))
}
