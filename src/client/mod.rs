pub mod api;
pub mod app;
pub mod dashboard;
pub mod form;
pub mod list;
pub mod notice;
pub mod render;

pub use api::{ClientError, DEFAULT_API_URL, FeedbackApi, HttpFeedbackApi};
pub use app::{App, Tab};
pub use dashboard::{Dashboard, DashboardStats};
pub use form::{FeedbackForm, FormData, SubmitOutcome};
pub use list::{DeleteOutcome, FeedbackList, ListFilters};
pub use notice::{Notice, NoticeKind};
