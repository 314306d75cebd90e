pub mod feedback;
pub mod schema;

pub use feedback::{FeedbackStore, MemoryFeedbackStore, PgFeedbackStore};
pub use schema::ensure_schema;
