use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{FeedbackRecord, NewFeedback},
};

pub async fn create_feedback(
    feedback: NewFeedback,
    postgres: &PgPool,
) -> Result<FeedbackRecord, AppError> {
    let record = sqlx::query_as::<_, FeedbackRecord>(
        "INSERT INTO feedback (student_name, course_code, comments, rating)
        VALUES ($1, $2, $3, $4)
        RETURNING id, student_name, course_code, comments, rating, created_at",
    )
    .bind(&feedback.student_name)
    .bind(&feedback.course_code)
    .bind(&feedback.comments)
    .bind(i32::from(feedback.rating.value()))
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::database("Failed to submit feedback", e))?;

    Ok(record)
}
