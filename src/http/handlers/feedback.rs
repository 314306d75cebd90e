use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    errors::AppError,
    models::{CreateFeedbackPayload, ErrorBody, FeedbackRecord, FeedbackResponse},
    state::AppState,
};

pub async fn get_all_feedback_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackRecord>>, (StatusCode, Json<ErrorBody>)> {
    let feedback = state.store.list().await.map_err(|e| {
        tracing::error!("Error retrieving feedback: {}", e);
        e.to_response()
    })?;

    tracing::info!("Retrieved {} feedback record(s)", feedback.len());
    Ok(Json(feedback))
}

pub async fn create_feedback_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateFeedbackPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<FeedbackResponse>), (StatusCode, Json<ErrorBody>)> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!("Rejected feedback body: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text()).to_response()
    })?;

    let new_feedback = payload.validate().map_err(|e| {
        tracing::warn!("Invalid feedback submission: {}", e);
        e.to_response()
    })?;

    let feedback = state.store.insert(new_feedback).await.map_err(|e| {
        tracing::error!("Error adding feedback: {}", e);
        e.to_response()
    })?;

    tracing::info!(
        "Feedback {} submitted for course {}",
        feedback.id,
        feedback.course_code
    );

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            message: "Feedback submitted successfully".into(),
            feedback,
        }),
    ))
}

pub async fn delete_feedback_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FeedbackResponse>, (StatusCode, Json<ErrorBody>)> {
    let id = id.trim().parse::<i32>().map_err(|_| {
        tracing::warn!("Invalid feedback id: {}", id);
        AppError::BadRequest("Invalid feedback id".into()).to_response()
    })?;

    let deleted = state.store.remove(id).await.map_err(|e| {
        tracing::error!("Error deleting feedback {}: {}", id, e);
        e.to_response()
    })?;

    let Some(feedback) = deleted else {
        tracing::warn!("Feedback {} not found for delete", id);
        return Err(AppError::NotFound("Feedback not found".into()).to_response());
    };

    tracing::info!("Feedback {} deleted", feedback.id);
    Ok(Json(FeedbackResponse {
        message: "Feedback deleted successfully".into(),
        feedback,
    }))
}
