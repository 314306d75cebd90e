use sqlx::PgPool;

use crate::errors::AppError;

pub const STUDENT_NAME_MAX_CHARS: usize = 255;
pub const COURSE_CODE_MAX_CHARS: usize = 50;

pub const FEEDBACK_TABLE: &str = "CREATE TABLE IF NOT EXISTS feedback (
    id SERIAL PRIMARY KEY,
    student_name VARCHAR(255) NOT NULL,
    course_code VARCHAR(50) NOT NULL,
    comments TEXT NOT NULL,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

pub async fn ensure_schema(postgres: &PgPool) -> Result<(), AppError> {
    sqlx::query(FEEDBACK_TABLE)
        .execute(postgres)
        .await
        .map_err(|e| AppError::database("Failed to create feedback table", e))?;

    tracing::info!("feedback table ready");
    Ok(())
}
