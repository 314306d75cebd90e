use sqlx::PgPool;

use crate::{errors::AppError, models::FeedbackRecord};

pub async fn delete_feedback(
    id: i32,
    postgres: &PgPool,
) -> Result<Option<FeedbackRecord>, AppError> {
    let deleted = sqlx::query_as::<_, FeedbackRecord>(
        "DELETE FROM feedback
        WHERE id = $1
        RETURNING id, student_name, course_code, comments, rating, created_at",
    )
    .bind(id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::database("Failed to delete feedback", e))?;

    Ok(deleted)
}
