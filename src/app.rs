use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/signup", post(handlers::signup))
        .route("/unregister", post(handlers::unregister))
        .route("/refresh", post(handlers::refresh))
        .route("/api/view", get(handlers::get_view))
        .with_state(state)
}
