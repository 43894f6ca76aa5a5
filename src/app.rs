use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::create_habit_form))
        .route("/habits/:id/toggle", post(handlers::toggle_form))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/api/habits/:id", get(handlers::get_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle))
        .with_state(state)
}
