use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::errors::AppError;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// A persisted feedback row. Field names follow the `feedback` table columns,
/// which is also how records travel over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeedbackRecord {
    pub id: i32,
    pub student_name: String,
    pub course_code: String,
    pub comments: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Rating(u8);

impl Rating {
    pub fn value(self) -> u8 {
        self.0
    }

    /// Accepts a JSON integer or a string holding one; anything else is
    /// treated as out of range.
    pub fn from_json(value: &Value) -> Result<Self, AppError> {
        let raw = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        raw.ok_or_else(out_of_range).and_then(Rating::try_from)
    }
}

impl TryFrom<i64> for Rating {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(out_of_range())
        }
    }
}

fn out_of_range() -> AppError {
    AppError::BadRequest("Rating must be between 1 and 5".into())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackPayload {
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub rating: Option<Value>,
}

impl CreateFeedbackPayload {
    pub fn new(
        student_name: impl Into<String>,
        course_code: impl Into<String>,
        comments: impl Into<String>,
        rating: i64,
    ) -> Self {
        Self {
            student_name: Some(student_name.into()),
            course_code: Some(course_code.into()),
            comments: Some(comments.into()),
            rating: Some(Value::from(rating)),
        }
    }

    pub fn validate(self) -> Result<NewFeedback, AppError> {
        let (Some(student_name), Some(course_code), Some(comments), Some(rating)) = (
            present(self.student_name),
            present(self.course_code),
            present(self.comments),
            self.rating.filter(is_truthy),
        ) else {
            return Err(AppError::BadRequest("All fields are required".into()));
        };

        Ok(NewFeedback {
            student_name,
            course_code,
            comments,
            rating: Rating::from_json(&rating)?,
        })
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Input that passed validation and is ready to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub student_name: String,
    pub course_code: String,
    pub comments: String,
    pub rating: Rating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub feedback: FeedbackRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}
