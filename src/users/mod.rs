pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(handlers::register))
        .route("/user/info/:id", get(handlers::diet_summary))
}
