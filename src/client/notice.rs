use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A banner shown above a view. `ttl` is how long it stays up after
/// `shown_at`; `None` means until the next action replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub ttl: Option<Duration>,
    pub shown_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text)
    }

    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            ttl: None,
            shown_at: Instant::now(),
        }
    }

    pub fn expiring_after(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn is_expired(&self) -> bool {
        self.ttl
            .is_some_and(|ttl| self.shown_at.elapsed() >= ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expiring_notice_goes_away_after_ttl() {
        let notice = Notice::success("Saved").expiring_after(Duration::from_secs(3));
        assert!(!notice.is_expired());

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert!(!notice.is_expired());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(notice.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_without_ttl_never_expires() {
        let notice = Notice::error("Failed");
        tokio::time::advance(Duration::from_secs(3600)).await;
        assert!(!notice.is_expired());
    }
}
