pub mod delete;
pub mod get;
pub mod memory;
pub mod post;

use async_trait::async_trait;
use sqlx::PgPool;

pub use delete::delete_feedback;
pub use get::get_all_feedback;
pub use memory::MemoryFeedbackStore;
pub use post::create_feedback;

use crate::{
    errors::AppError,
    models::{FeedbackRecord, NewFeedback},
};

/// Persistence for feedback records. The store owns identity: it assigns
/// `id` and `created_at` on insert.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// All records, newest first.
    async fn list(&self) -> Result<Vec<FeedbackRecord>, AppError>;

    async fn insert(&self, feedback: NewFeedback) -> Result<FeedbackRecord, AppError>;

    /// Returns the removed record, or `None` when nothing matched.
    async fn remove(&self, id: i32) -> Result<Option<FeedbackRecord>, AppError>;
}

#[derive(Clone)]
pub struct PgFeedbackStore {
    postgres: PgPool,
}

impl PgFeedbackStore {
    pub fn new(postgres: PgPool) -> Self {
        Self { postgres }
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn list(&self) -> Result<Vec<FeedbackRecord>, AppError> {
        get_all_feedback(&self.postgres).await
    }

    async fn insert(&self, feedback: NewFeedback) -> Result<FeedbackRecord, AppError> {
        create_feedback(feedback, &self.postgres).await
    }

    async fn remove(&self, id: i32) -> Result<Option<FeedbackRecord>, AppError> {
        delete_feedback(id, &self.postgres).await
    }
}
