use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    client::api::FeedbackApi,
    models::{
        FeedbackRecord,
        feedback::{MAX_RATING, MIN_RATING},
    },
};

pub const RECENT_LIMIT: usize = 3;
pub const PREVIEW_CHARS: usize = 100;

/// Count of records per rating value. Every value from 1 to 5 is always
/// present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RatingDistribution(BTreeMap<i32, usize>);

impl Default for RatingDistribution {
    fn default() -> Self {
        let counts = (MIN_RATING as i32..=MAX_RATING as i32)
            .map(|rating| (rating, 0))
            .collect();
        Self(counts)
    }
}

impl RatingDistribution {
    fn record(&mut self, rating: i32) {
        if let Some(count) = self.0.get_mut(&rating) {
            *count += 1;
        }
    }

    pub fn count(&self, rating: i32) -> usize {
        self.0.get(&rating).copied().unwrap_or(0)
    }

    /// `(rating, count)` pairs in ascending rating order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (i32, usize)> + '_ {
        self.0.iter().map(|(rating, count)| (*rating, *count))
    }

    /// Highest rating that has at least one record.
    pub fn highest(&self) -> Option<i32> {
        self.iter()
            .rev()
            .find(|(_, count)| *count > 0)
            .map(|(rating, _)| rating)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub average_rating: f64,
    pub rating_distribution: RatingDistribution,
    pub recent_feedback: Vec<FeedbackRecord>,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self::from_records(&[])
    }
}

impl DashboardStats {
    /// Expects `records` newest first, as the API returns them.
    pub fn from_records(records: &[FeedbackRecord]) -> Self {
        let total = records.len();

        let mut rating_distribution = RatingDistribution::default();
        for record in records {
            rating_distribution.record(record.rating);
        }

        let average_rating = if total > 0 {
            let sum: i64 = records.iter().map(|r| i64::from(r.rating)).sum();
            round_to_tenth(sum as f64 / total as f64)
        } else {
            0.0
        };

        Self {
            total,
            average_rating,
            rating_distribution,
            recent_feedback: records.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }

    pub fn highest_rating(&self) -> Option<i32> {
        self.rating_distribution.highest()
    }

    /// Share of all records holding `rating`, as a percentage.
    pub fn share_percent(&self, rating: i32) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.rating_distribution.count(rating) as f64 / self.total as f64 * 100.0
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// First `PREVIEW_CHARS` characters of a comment followed by an ellipsis.
pub fn comment_preview(comments: &str) -> String {
    let head: String = comments.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

#[derive(Debug, Default)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub loading: bool,
}

impl Dashboard {
    /// Recomputes the stats from a fresh fetch. A failed fetch keeps the
    /// previous stats.
    pub async fn refresh(&mut self, api: &dyn FeedbackApi) {
        self.loading = true;
        match api.fetch_feedback().await {
            Ok(records) => self.stats = DashboardStats::from_records(&records),
            Err(e) => tracing::error!("Error fetching stats: {}", e),
        }
        self.loading = false;
    }
}
