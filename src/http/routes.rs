use axum::{
    Router,
    routing::{MethodRouter, delete, get},
};

use crate::{
    http::handlers::{
        create_feedback_handler, delete_feedback_handler, get_all_feedback_handler, root_handler,
    },
    state::AppState,
};

fn feedback_collection() -> MethodRouter<AppState> {
    get(get_all_feedback_handler).post(create_feedback_handler)
}

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/feedback", feedback_collection())
        .route("/api/feedback/", feedback_collection())
        .route("/api/feedback/{id}", delete(delete_feedback_handler))
        .with_state(state)
}
