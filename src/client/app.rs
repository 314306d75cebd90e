use std::time::Duration;

/// Delay between a successful submission and switching to the list view.
pub const SUBMIT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Submit,
    View,
}

/// Top-level view state. `refresh_trigger` changes whenever views holding
/// fetched data should reload.
#[derive(Debug, Default)]
pub struct App {
    pub active_tab: Tab,
    pub refresh_trigger: u64,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn on_feedback_submitted(&mut self) {
        self.refresh_trigger += 1;
        self.active_tab = Tab::View;
    }

    /// Waits out the redirect delay, then switches to the list.
    pub async fn finish_submission(&mut self) {
        tokio::time::sleep(SUBMIT_REDIRECT_DELAY).await;
        self.on_feedback_submitted();
    }
}
