pub mod feedback;

use axum::Json;

use crate::models::StatusMessage;

pub use feedback::{create_feedback_handler, delete_feedback_handler, get_all_feedback_handler};

pub async fn root_handler() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Student Feedback API is running".into(),
    })
}
