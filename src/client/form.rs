use std::{collections::BTreeMap, fmt};

use crate::{
    client::{api::FeedbackApi, notice::Notice},
    models::{
        CreateFeedbackPayload, FeedbackRecord,
        feedback::{MAX_RATING, MIN_RATING},
    },
};

pub const MIN_COMMENT_CHARS: usize = 10;

const SUBMIT_SUCCEEDED: &str = "Feedback submitted successfully!";
const SUBMIT_FAILED: &str = "Failed to submit feedback. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    StudentName,
    CourseCode,
    Comments,
    Rating,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::StudentName => "Student Name",
            Field::CourseCode => "Course Code",
            Field::Comments => "Comments",
            Field::Rating => "Rating",
        };
        f.write_str(label)
    }
}

/// Raw form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub student_name: String,
    pub course_code: String,
    pub comments: String,
    pub rating: String,
}

impl FormData {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::StudentName => &mut self.student_name,
            Field::CourseCode => &mut self.course_code,
            Field::Comments => &mut self.comments,
            Field::Rating => &mut self.rating,
        };
        *slot = value.into();
    }

    fn parsed_rating(&self) -> Option<i64> {
        self.rating.trim().parse::<i64>().ok()
    }

    /// Request body for already-validated data.
    fn to_payload(&self) -> Option<CreateFeedbackPayload> {
        let rating = self.parsed_rating()?;
        Some(CreateFeedbackPayload::new(
            self.student_name.clone(),
            self.course_code.clone(),
            self.comments.clone(),
            rating,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, *msg))
    }

    fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

pub fn validate(data: &FormData) -> FieldErrors {
    let mut errors = BTreeMap::new();

    if data.student_name.trim().is_empty() {
        errors.insert(Field::StudentName, "Student name is required");
    }

    if data.course_code.trim().is_empty() {
        errors.insert(Field::CourseCode, "Course code is required");
    }

    let comments = data.comments.trim();
    if comments.is_empty() {
        errors.insert(Field::Comments, "Comments are required");
    } else if comments.chars().count() < MIN_COMMENT_CHARS {
        errors.insert(Field::Comments, "Comments must be at least 10 characters");
    }

    if data.rating.trim().is_empty() {
        errors.insert(Field::Rating, "Rating is required");
    } else if !data
        .parsed_rating()
        .is_some_and(|r| (MIN_RATING..=MAX_RATING).contains(&r))
    {
        errors.insert(Field::Rating, "Rating must be between 1 and 5");
    }

    FieldErrors(errors)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blocked locally; nothing was sent.
    Invalid,
    Submitted(FeedbackRecord),
    Failed,
}

#[derive(Debug, Default)]
pub struct FeedbackForm {
    data: FormData,
    errors: FieldErrors,
    pub submitting: bool,
    pub message: Option<Notice>,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: FormData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Updates one field and clears any error shown for it.
    pub fn handle_change(&mut self, field: Field, value: impl Into<String>) {
        self.data.set(field, value);
        self.errors.clear(field);
    }

    pub async fn submit(&mut self, api: &dyn FeedbackApi) -> SubmitOutcome {
        self.message = None;

        let errors = validate(&self.data);
        if !errors.is_empty() {
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }

        let Some(payload) = self.data.to_payload() else {
            return SubmitOutcome::Invalid;
        };

        self.submitting = true;
        let result = api.submit_feedback(&payload).await;
        self.submitting = false;

        match result {
            Ok(response) => {
                tracing::info!("Feedback {} submitted", response.feedback.id);
                self.message = Some(Notice::success(SUBMIT_SUCCEEDED));
                self.data = FormData::default();
                SubmitOutcome::Submitted(response.feedback)
            }
            Err(e) => {
                tracing::error!("Error submitting feedback: {}", e);
                let text = e.server_message().unwrap_or(SUBMIT_FAILED);
                self.message = Some(Notice::error(text));
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormData {
        FormData {
            student_name: "Ada Lovelace".into(),
            course_code: "CS101".into(),
            comments: "Engaging lectures".into(),
            rating: "4".into(),
        }
    }

    #[test]
    fn test_complete_form_has_no_errors() {
        assert!(validate(&filled()).is_empty());
    }

    #[test]
    fn test_blank_fields_are_required() {
        let errors = validate(&FormData {
            student_name: "  ".into(),
            ..FormData::default()
        });

        assert_eq!(
            errors.get(Field::StudentName),
            Some("Student name is required")
        );
        assert_eq!(errors.get(Field::CourseCode), Some("Course code is required"));
        assert_eq!(errors.get(Field::Comments), Some("Comments are required"));
        assert_eq!(errors.get(Field::Rating), Some("Rating is required"));
    }

    #[test]
    fn test_comment_length_counts_trimmed_characters() {
        let mut data = filled();
        data.comments = "  123456789  ".into();
        assert_eq!(
            validate(&data).get(Field::Comments),
            Some("Comments must be at least 10 characters")
        );

        data.comments = "  1234567890  ".into();
        assert_eq!(validate(&data).get(Field::Comments), None);
    }

    #[test]
    fn test_comment_length_counts_characters_not_code_units() {
        let mut data = filled();
        data.comments = "😀😀😀😀😀".into();
        assert_eq!(
            validate(&data).get(Field::Comments),
            Some("Comments must be at least 10 characters")
        );

        data.comments = "😀".repeat(MIN_COMMENT_CHARS);
        assert_eq!(validate(&data).get(Field::Comments), None);
    }

    #[test]
    fn test_rating_must_be_an_integer_in_range() {
        for rating in ["0", "6", "abc", "3.5"] {
            let mut data = filled();
            data.rating = rating.into();
            assert_eq!(
                validate(&data).get(Field::Rating),
                Some("Rating must be between 1 and 5"),
                "rating {:?}",
                rating
            );
        }
    }

    #[test]
    fn test_editing_a_field_clears_only_its_error() {
        let mut form = FeedbackForm::new();
        form.errors = validate(form.data());
        assert!(form.errors().get(Field::Comments).is_some());

        form.handle_change(Field::Comments, "Now long enough to pass");
        assert_eq!(form.errors().get(Field::Comments), None);
        assert!(form.errors().get(Field::Rating).is_some());
        assert_eq!(form.data().comments, "Now long enough to pass");
    }
}
