pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat_handlers;
use crate::mood::handlers as mood_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/chat", post(chat_handlers::handle_chat))
        .route("/api/v1/mood", post(mood_handlers::handle_log_mood))
        .route(
            "/api/v1/mood/history",
            get(mood_handlers::handle_mood_history),
        )
        .route("/api/v1/mood/trend", get(mood_handlers::handle_mood_trend))
        .with_state(state)
}
