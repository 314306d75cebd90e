use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::FeedbackStore;
use crate::{
    db::schema::{COURSE_CODE_MAX_CHARS, STUDENT_NAME_MAX_CHARS},
    errors::AppError,
    models::{FeedbackRecord, NewFeedback},
};

/// In-process store with the same ordering, identity and column-length
/// rules as the Postgres table. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryFeedbackStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<FeedbackRecord>,
    last_id: i32,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing rows, keeping their ids and timestamps.
    pub fn with_records(records: Vec<FeedbackRecord>) -> Self {
        let last_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            inner: Mutex::new(MemoryState { records, last_id }),
        }
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn list(&self) -> Result<Vec<FeedbackRecord>, AppError> {
        let state = self.inner.lock().await;
        let mut records = state.records.clone();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn insert(&self, feedback: NewFeedback) -> Result<FeedbackRecord, AppError> {
        check_length(&feedback.student_name, STUDENT_NAME_MAX_CHARS)?;
        check_length(&feedback.course_code, COURSE_CODE_MAX_CHARS)?;

        let mut state = self.inner.lock().await;
        state.last_id += 1;

        let record = FeedbackRecord {
            id: state.last_id,
            student_name: feedback.student_name,
            course_code: feedback.course_code,
            comments: feedback.comments,
            rating: i32::from(feedback.rating.value()),
            created_at: Utc::now(),
        };
        state.records.push(record.clone());

        Ok(record)
    }

    async fn remove(&self, id: i32) -> Result<Option<FeedbackRecord>, AppError> {
        let mut state = self.inner.lock().await;
        let position = state.records.iter().position(|r| r.id == id);
        Ok(position.map(|idx| state.records.remove(idx)))
    }
}

fn check_length(value: &str, max_chars: usize) -> Result<(), AppError> {
    if value.chars().count() > max_chars {
        return Err(AppError::database(
            "Failed to submit feedback",
            format!("value too long for type character varying({})", max_chars),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateFeedbackPayload;

    fn new_feedback(name: &str, rating: i64) -> NewFeedback {
        CreateFeedbackPayload::new(name, "CS101", "Clear and well paced", rating)
            .validate()
            .unwrap()
    }

    #[tokio::test]
    async fn test_assigns_increasing_ids_and_lists_newest_first() {
        let store = MemoryFeedbackStore::new();
        let first = store.insert(new_feedback("Ada", 5)).await.unwrap();
        let second = store.insert(new_feedback("Grace", 3)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let ids: Vec<i32> = store.list().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_remove_returns_the_deleted_record_once() {
        let store = MemoryFeedbackStore::new();
        let record = store.insert(new_feedback("Ada", 4)).await.unwrap();

        let removed = store.remove(record.id).await.unwrap();
        assert_eq!(removed, Some(record.clone()));
        assert_eq!(store.remove(record.id).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_column_limits_match_the_table() {
        let store = MemoryFeedbackStore::new();

        let mut long_name = new_feedback("Ada", 4);
        long_name.student_name = "a".repeat(STUDENT_NAME_MAX_CHARS + 1);
        let err = store.insert(long_name).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to submit feedback: value too long for type character varying(255)"
        );

        let mut long_course = new_feedback("Ada", 4);
        long_course.course_code = "C".repeat(COURSE_CODE_MAX_CHARS + 1);
        assert!(store.insert(long_course).await.is_err());
        assert!(store.list().await.unwrap().is_empty());

        let mut at_limit = new_feedback("Ada", 4);
        at_limit.student_name = "a".repeat(STUDENT_NAME_MAX_CHARS);
        at_limit.course_code = "C".repeat(COURSE_CODE_MAX_CHARS);
        assert_eq!(store.insert(at_limit).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = MemoryFeedbackStore::new();
        let record = store.insert(new_feedback("Ada", 4)).await.unwrap();
        store.remove(record.id).await.unwrap();

        let next = store.insert(new_feedback("Grace", 2)).await.unwrap();
        assert_eq!(next.id, record.id + 1);
    }
}
