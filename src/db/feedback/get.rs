use sqlx::PgPool;

use crate::{errors::AppError, models::FeedbackRecord};

pub async fn get_all_feedback(postgres: &PgPool) -> Result<Vec<FeedbackRecord>, AppError> {
    let feedback = sqlx::query_as::<_, FeedbackRecord>(
        "SELECT id, student_name, course_code, comments, rating, created_at
        FROM feedback
        ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::database("Failed to retrieve feedback", e))?;

    Ok(feedback)
}
