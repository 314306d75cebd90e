use std::{collections::BTreeSet, fmt, str::FromStr, time::Duration};

use crate::{
    client::{api::FeedbackApi, notice::Notice},
    models::FeedbackRecord,
};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this feedback?";
pub const DELETE_NOTICE_TTL: Duration = Duration::from_secs(3);

const LOAD_FAILED: &str = "Failed to load feedback. Please try again later.";
const DELETE_FAILED: &str = "Failed to delete feedback. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "highest" => Ok(SortKey::Highest),
            "lowest" => Ok(SortKey::Lowest),
            other => Err(format!(
                "unknown sort key '{}', expected newest, oldest, highest or lowest",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Highest => "highest",
            SortKey::Lowest => "lowest",
        };
        f.write_str(key)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RatingFilter {
    #[default]
    All,
    Only(i32),
}

impl FromStr for RatingFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(RatingFilter::All);
        }
        match s.parse::<i32>() {
            Ok(rating) if (1..=5).contains(&rating) => Ok(RatingFilter::Only(rating)),
            _ => Err(format!("rating filter must be 'all' or 1-5, got '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CourseFilter {
    #[default]
    All,
    Only(String),
}

impl FromStr for CourseFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CourseFilter::All)
        } else {
            Ok(CourseFilter::Only(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub search: String,
    pub rating: RatingFilter,
    pub course: CourseFilter,
    pub sort: SortKey,
}

impl ListFilters {
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        if !self.search.trim().is_empty() {
            let term = self.search.to_lowercase();
            let hit = record.student_name.to_lowercase().contains(&term)
                || record.course_code.to_lowercase().contains(&term)
                || record.comments.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if let RatingFilter::Only(rating) = self.rating {
            if record.rating != rating {
                return false;
            }
        }

        match &self.course {
            CourseFilter::All => true,
            CourseFilter::Only(course) => &record.course_code == course,
        }
    }

    /// Filters, then sorts. Equal keys keep their incoming order.
    pub fn apply<'a>(&self, records: &'a [FeedbackRecord]) -> Vec<&'a FeedbackRecord> {
        let mut view: Vec<&FeedbackRecord> = records.iter().filter(|r| self.matches(r)).collect();

        match self.sort {
            SortKey::Newest => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Oldest => view.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortKey::Highest => view.sort_by(|a, b| b.rating.cmp(&a.rating)),
            SortKey::Lowest => view.sort_by(|a, b| a.rating.cmp(&b.rating)),
        }

        view
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Distinct course codes across all records, sorted.
pub fn unique_courses(records: &[FeedbackRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.course_code.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
}

/// View state for browsing feedback.
#[derive(Debug, Default)]
pub struct FeedbackList {
    records: Vec<FeedbackRecord>,
    pub filters: ListFilters,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<Notice>,
}

impl FeedbackList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    /// Replaces the records with a fresh fetch. On failure the previous
    /// records stay and `error` is set.
    pub async fn refresh(&mut self, api: &dyn FeedbackApi) {
        self.loading = true;
        self.error = None;
        self.clear_expired_notice();

        match api.fetch_feedback().await {
            Ok(records) => self.records = records,
            Err(e) => {
                tracing::error!("Error fetching feedback: {}", e);
                self.error = Some(LOAD_FAILED.into());
            }
        }

        self.loading = false;
    }

    /// Deletes `id` once `confirm` agrees, then re-fetches. No local removal
    /// happens; the list only changes through the re-fetch.
    pub async fn delete(
        &mut self,
        api: &dyn FeedbackApi,
        id: i32,
        confirm: impl FnOnce(&str) -> bool,
    ) -> DeleteOutcome {
        if !confirm(DELETE_CONFIRMATION) {
            return DeleteOutcome::Cancelled;
        }
        self.notice = None;

        match api.delete_feedback(id).await {
            Ok(_) => {
                self.notice = Some(
                    Notice::success("Feedback deleted successfully")
                        .expiring_after(DELETE_NOTICE_TTL),
                );
                self.refresh(api).await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::error!("Error deleting feedback {}: {}", id, e);
                self.error = Some(DELETE_FAILED.into());
                DeleteOutcome::Failed
            }
        }
    }

    /// The current notice, unless its time is up.
    pub fn active_notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| !notice.is_expired())
    }

    fn clear_expired_notice(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    pub fn visible(&self) -> Vec<&FeedbackRecord> {
        self.filters.apply(&self.records)
    }

    pub fn course_options(&self) -> Vec<String> {
        unique_courses(&self.records)
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} feedback(s)",
            self.visible().len(),
            self.records.len()
        )
    }

    /// Message for an empty view, `None` when something is visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.records.is_empty() {
            Some("No feedback submitted yet. Be the first to share your thoughts!")
        } else if self.visible().is_empty() {
            Some("No feedback matches your search criteria.")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: i32, course: &str, rating: i32, minute: u32, comments: &str) -> FeedbackRecord {
        FeedbackRecord {
            id,
            student_name: format!("Student {}", id),
            course_code: course.into(),
            comments: comments.into(),
            rating,
            created_at: Utc.with_ymd_and_hms(2025, 4, 10, 12, minute, 0).unwrap(),
        }
    }

    // A is newest, C oldest.
    fn fixture() -> Vec<FeedbackRecord> {
        vec![
            record(1, "CS101", 5, 30, "Loved the recursion unit"),
            record(2, "CS101", 2, 20, "Too fast for beginners"),
            record(3, "MATH201", 4, 10, "Proofs were well explained"),
        ]
    }

    fn ids(view: &[&FeedbackRecord]) -> Vec<i32> {
        view.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_course_filter_is_exact() {
        let records = fixture();
        let filters = ListFilters {
            course: CourseFilter::Only("CS101".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&records)), vec![1, 2]);

        let filters = ListFilters {
            course: CourseFilter::Only("cs101".into()),
            ..Default::default()
        };
        assert!(filters.apply(&records).is_empty());
    }

    #[test]
    fn test_sorts_by_rating_and_date() {
        let records = fixture();
        let mut filters = ListFilters {
            sort: SortKey::Highest,
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&records)), vec![1, 3, 2]);

        filters.sort = SortKey::Lowest;
        assert_eq!(ids(&filters.apply(&records)), vec![2, 3, 1]);

        filters.sort = SortKey::Oldest;
        assert_eq!(ids(&filters.apply(&records)), vec![3, 2, 1]);

        filters.sort = SortKey::Newest;
        assert_eq!(ids(&filters.apply(&records)), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let records = fixture();
        let mut filters = ListFilters {
            search: "math".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&records)), vec![3]);

        filters.search = "RECURSION".into();
        assert_eq!(ids(&filters.apply(&records)), vec![1]);

        filters.search = "student 2".into();
        assert_eq!(ids(&filters.apply(&records)), vec![2]);

        filters.search = "   ".into();
        assert_eq!(filters.apply(&records).len(), 3);
    }

    #[test]
    fn test_rating_filter_combines_with_search() {
        let records = fixture();
        let filters = ListFilters {
            search: "cs".into(),
            rating: RatingFilter::Only(2),
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&records)), vec![2]);
    }

    #[test]
    fn test_ties_keep_incoming_order() {
        let records = vec![
            record(1, "CS101", 4, 0, "First of the fours"),
            record(2, "CS101", 4, 0, "Second of the fours"),
            record(3, "CS101", 5, 0, "The only five here"),
        ];
        let filters = ListFilters {
            sort: SortKey::Highest,
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&records)), vec![3, 1, 2]);
    }

    #[test]
    fn test_course_options_are_distinct_and_sorted() {
        let mut records = fixture();
        records.push(record(4, "BICA3110", 3, 5, "Lab sessions ran long"));
        assert_eq!(unique_courses(&records), vec!["BICA3110", "CS101", "MATH201"]);
    }

    #[test]
    fn test_clear_resets_every_filter() {
        let mut filters = ListFilters {
            search: "x".into(),
            rating: RatingFilter::Only(3),
            course: CourseFilter::Only("CS101".into()),
            sort: SortKey::Lowest,
        };
        filters.clear();
        assert_eq!(filters, ListFilters::default());
    }

    #[test]
    fn test_parses_filter_arguments() {
        assert_eq!("highest".parse::<SortKey>(), Ok(SortKey::Highest));
        assert!("random".parse::<SortKey>().is_err());
        assert_eq!("all".parse::<RatingFilter>(), Ok(RatingFilter::All));
        assert_eq!("4".parse::<RatingFilter>(), Ok(RatingFilter::Only(4)));
        assert!("9".parse::<RatingFilter>().is_err());
        assert_eq!(
            "MATH201".parse::<CourseFilter>(),
            Ok(CourseFilter::Only("MATH201".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_notice_expires_after_ttl() {
        let mut list = FeedbackList::new();
        list.notice =
            Some(Notice::success("Feedback deleted successfully").expiring_after(DELETE_NOTICE_TTL));
        assert!(list.active_notice().is_some());

        tokio::time::advance(DELETE_NOTICE_TTL).await;
        assert!(list.active_notice().is_none());

        list.clear_expired_notice();
        assert!(list.notice.is_none());
    }

    #[test]
    fn test_summary_and_empty_messages() {
        let mut list = FeedbackList::new();
        assert_eq!(
            list.empty_message(),
            Some("No feedback submitted yet. Be the first to share your thoughts!")
        );

        list.records = fixture();
        list.filters.search = "nothing matches this".into();
        assert_eq!(list.summary(), "Showing 0 of 3 feedback(s)");
        assert_eq!(
            list.empty_message(),
            Some("No feedback matches your search criteria.")
        );

        list.filters.clear();
        assert_eq!(list.summary(), "Showing 3 of 3 feedback(s)");
        assert_eq!(list.empty_message(), None);
    }
}
