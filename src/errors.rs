use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{context}: {detail}")]
    DatabaseError {
        context: &'static str,
        detail: String,
    },

    #[error("Env error: {0}")]
    EnvError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn database(context: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::DatabaseError {
            context,
            detail: err.to_string(),
        }
    }

    pub fn to_response(&self) -> (StatusCode, Json<ErrorBody>) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(ErrorBody::new(msg))),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(ErrorBody::new(msg))),
            AppError::DatabaseError { context, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::with_message(*context, detail)),
            ),
            AppError::EnvError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::with_message("Server misconfigured", msg)),
            ),
            AppError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::with_message("Something went wrong!", msg)),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}
