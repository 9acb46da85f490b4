pub mod dto;
pub mod handlers;
pub mod metrics;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meal", post(handlers::create_meal))
        .route(
            "/meal/:id",
            get(handlers::get_meal)
                .put(handlers::update_meal)
                .delete(handlers::delete_meal),
        )
        .route("/meal/user/:user_id", get(handlers::list_meals_for_user))
}
